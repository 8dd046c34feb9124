//! Built-in six-model sample batch.
//!
//! Used by `riskrep sample` and as the default input when the binary is run
//! without arguments.

/// Sample input in the `{"models": [...]}` JSON shape.
pub const SAMPLE_MODELS_JSON: &str = r#"{
  "models": [
    {
      "model_id": "JSONModel1",
      "investment_amount": 50,
      "expected_return": 2,
      "volatility": 5,
      "risk_free_rate": 1,
      "market_index_level": 500,
      "beta": 0.5
    },
    {
      "model_id": "JSONModel2",
      "investment_amount": 100,
      "expected_return": 4,
      "volatility": 8,
      "risk_free_rate": 1.5,
      "market_index_level": 800,
      "beta": 0.7
    },
    {
      "model_id": "JSONModel3",
      "investment_amount": 200,
      "expected_return": 6,
      "volatility": 15,
      "risk_free_rate": 2,
      "market_index_level": 1500,
      "beta": 0.9
    },
    {
      "model_id": "JSONModel4",
      "investment_amount": 300,
      "expected_return": 10,
      "volatility": 40,
      "risk_free_rate": 3,
      "market_index_level": 1800,
      "beta": 1.0
    },
    {
      "model_id": "JSONModel5",
      "investment_amount": 250,
      "expected_return": 8,
      "volatility": 35,
      "risk_free_rate": 2,
      "market_index_level": 1600,
      "beta": 0.8
    },
    {
      "model_id": "JSONModel6",
      "investment_amount": 120,
      "expected_return": 5,
      "volatility": 10,
      "risk_free_rate": 1.5,
      "market_index_level": 900,
      "beta": 0.6
    }
  ]
}
"#;

/// The sample batch as a top-level JSON array of model objects.
pub fn sample_models_array() -> String {
    match serde_json::from_str::<serde_json::Value>(SAMPLE_MODELS_JSON) {
        Ok(serde_json::Value::Object(mut obj)) => obj
            .remove("models")
            .map(|models| models.to_string())
            .unwrap_or_else(|| "[]".to_string()),
        _ => "[]".to_string(),
    }
}
