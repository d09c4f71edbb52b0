use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body returned by delete endpoints.
#[derive(Serialize, Debug, PartialEq)]
pub struct StatusMessage {
    pub status: &'static str,
}

impl StatusMessage {
    pub fn deleted() -> Self {
        Self { status: "deleted" }
    }
}
