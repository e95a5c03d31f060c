use deepcopy::CopyBuffer;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct TestStruct {
    data: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let orig = TestStruct {
        data: vec!["a".into(), "b".into(), "c".into()],
    };

    let mut buffer = CopyBuffer::<TestStruct>::new();
    let copy = buffer.deep_copy(&orig).expect("deep copy failed");

    println!("{:?}", orig);
    println!("{:?}", copy);
}
