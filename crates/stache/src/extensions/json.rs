// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! JSON documents as template data.
//!
//! `null` is an absent value, arrays are sequences and objects are records.
//!
//! ```rust
//! let data = serde_json::json!({ "user": { "name": "Ada", "langs": ["en", "fr"] } });
//! let out = stache::render("{{#user}}{{name}}: {{#langs}}{{.}} {{/langs}}{{/user}}", &data).unwrap();
//! assert_eq!(out, "Ada: en fr ");
//! ```

use crate::data::{Data, Record, Shape};
use serde_json::{Map, Value};

impl Data for Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            Value::Null => Shape::Optional(None),
            Value::Bool(flag) => Shape::Bool(*flag),
            Value::Number(number) => Shape::Scalar(number),
            Value::String(text) => Shape::Str(text),
            Value::Array(items) => Shape::Sequence(items),
            Value::Object(map) => Shape::Record(map),
        }
    }
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> Option<&dyn Data> {
        self.get(name).map(|value| value as &dyn Data)
    }
}

impl Data for Map<String, Value> {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    #[test]
    fn test_json_shapes() {
        let data = json!({
            "n": 1.5,
            "flag": true,
            "none": null,
            "list": [1, 2, 3],
            "obj": { "inner": "x" }
        });
        let out = crate::render(
            "{{n}} {{flag}} [{{none}}] {{list.len}} {{obj.inner}}{{^none}}!{{/none}}",
            &data,
        )
        .unwrap();
        assert_eq!(out, "1.5 true [] 3 x!");
    }

    #[test]
    fn test_null_breaks_dotted_chain() {
        let data = json!({ "a": null, "b": { "c": "outer" } });
        let out = crate::render("{{#b}}[{{a.c}}]{{/b}}", &data).unwrap();
        assert_eq!(out, "[]");
    }
}
