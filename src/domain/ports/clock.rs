/// Current time source in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Source of opaque unique identifiers.
pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> String;
}
