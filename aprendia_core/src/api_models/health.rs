use serde::{Deserialize, Serialize};


#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
