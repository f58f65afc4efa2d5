use serde_json::{Map, Value};
use tracing::warn;

/// One JSON object as returned by the API.
pub type Record = Map<String, Value>;

/// The shapes a positions-style payload can take, in decode priority order.
#[derive(Clone, Debug, PartialEq)]
pub enum PositionsPayload {
    List(Vec<Value>),
    Positions(Value),
    Data(Value),
    Single(Record),
    Other(Value),
}

impl From<Value> for PositionsPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => PositionsPayload::List(items),
            Value::Object(mut map) => {
                if let Some(positions) = map.remove("positions") {
                    PositionsPayload::Positions(positions)
                } else if let Some(data) = map.remove("data") {
                    PositionsPayload::Data(data)
                } else {
                    PositionsPayload::Single(map)
                }
            }
            other => PositionsPayload::Other(other),
        }
    }
}

impl PositionsPayload {
    pub fn into_records(self) -> Vec<Record> {
        match self {
            PositionsPayload::List(items) => objects(items),
            PositionsPayload::Positions(inner) | PositionsPayload::Data(inner) => match inner {
                Value::Array(items) => objects(items),
                Value::Object(map) => vec![map],
                Value::Null => Vec::new(),
                other => {
                    warn!("Ignoring non-collection payload: {}", other);
                    Vec::new()
                }
            },
            PositionsPayload::Single(map) => vec![map],
            PositionsPayload::Other(Value::Null) => Vec::new(),
            PositionsPayload::Other(other) => {
                warn!("Ignoring unexpected payload: {}", other);
                Vec::new()
            }
        }
    }
}

/// Decodes any supported payload shape into an ordered record sequence.
pub fn normalize_records(value: Value) -> Vec<Record> {
    PositionsPayload::from(value).into_records()
}

fn objects(items: Vec<Value>) -> Vec<Record> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map),
            other => {
                warn!("Skipping non-object record: {}", other);
                None
            }
        })
        .collect()
}
