use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestStruct {
    pub data: Vec<String>,
    pub ptr: Option<Box<String>>,
}

pub fn test_struct(data: &[&str], ptr: &str) -> TestStruct {
    TestStruct {
        data: data.iter().map(|s| s.to_string()).collect(),
        ptr: Some(Box::new(ptr.to_string())),
    }
}
