//! 结构化输出的 JSON Schema 生成
//!
//! 严格模式（`strict: true`）的 `json_schema` 输出对 schema 有额外要求：
//! 所有 object 必须带 `additionalProperties: false`，所有属性都必须出现在
//! `required` 中，且不能依赖 `$ref` 引用。

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// 可作为结构化输出目标的类型
///
/// 对所有 `JsonSchema + DeserializeOwned` 类型自动实现。
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// 生成满足严格模式要求的 schema
    fn strict_schema() -> serde_json::Result<Value> {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema)?;

        let definitions = match &mut value {
            Value::Object(root) => {
                root.remove("$schema");
                root.remove("definitions")
            }
            _ => None,
        };

        if let Some(Value::Object(defs)) = definitions {
            inline_refs(&mut value, &defs);
        }
        seal_objects(&mut value);

        Ok(value)
    }

    /// schema 名称（用作 `json_schema.name`）
    fn output_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// 用 definitions 中的定义替换 `#/definitions/...` 引用
fn inline_refs(value: &mut Value, definitions: &Map<String, Value>) {
    match value {
        Value::Object(map) => {
            let target = map
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|r| r.strip_prefix("#/definitions/"))
                .and_then(|name| definitions.get(name))
                .cloned();

            if let Some(def) = target {
                *value = def;
                inline_refs(value, definitions);
                return;
            }

            for v in map.values_mut() {
                inline_refs(v, definitions);
            }
        }
        Value::Array(items) => {
            for item in items {
                inline_refs(item, definitions);
            }
        }
        _ => {}
    }
}

/// 为每个 object schema 补上 `additionalProperties: false` 和完整的 `required`
fn seal_objects(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some("object") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));

                let keys: Option<Vec<Value>> = map
                    .get("properties")
                    .and_then(Value::as_object)
                    .map(|props| props.keys().cloned().map(Value::String).collect());
                if let Some(keys) = keys {
                    map.insert("required".to_string(), Value::Array(keys));
                }
            }

            for v in map.values_mut() {
                seal_objects(v);
            }
        }
        Value::Array(items) => {
            for item in items {
                seal_objects(item);
            }
        }
        _ => {}
    }
}
