use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric kind a feature is coerced to before it reaches the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Float,
    Int,
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float => write!(f, "float"),
            Self::Int => write!(f, "int"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: String,
    pub kind: FeatureKind,
}

impl FeatureSpec {
    pub fn new(name: impl Into<String>, kind: FeatureKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered input layout a model was trained on. Position `i` of every
/// feature vector holds `features[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub name: String,
    pub version: u32,
    pub features: Vec<FeatureSpec>,
}

impl FeatureSchema {
    pub const HOUSE_PRICE: &'static str = "house_price";

    /// The layout served by `/predict`.
    pub fn house_price() -> Self {
        Self {
            name: Self::HOUSE_PRICE.to_string(),
            version: 1,
            features: vec![
                FeatureSpec::new("bathrooms", FeatureKind::Float),
                FeatureSpec::new("square_footage", FeatureKind::Float),
                FeatureSpec::new("lot_size", FeatureKind::Float),
                FeatureSpec::new("year_built", FeatureKind::Int),
                FeatureSpec::new("bedrooms", FeatureKind::Int),
            ],
        }
    }

    pub fn width(&self) -> usize {
        self.features.len()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.name.as_str())
    }
}

impl fmt::Display for FeatureSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@v{} [", self.name, self.version)?;
        for (i, spec) in self.features.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", spec.name, spec.kind)?;
        }
        write!(f, "]")
    }
}

/// A coerced feature value, kept in its schema kind until the model reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Float(f64),
    Int(i64),
}

impl FeatureValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Float(v) => v,
            Self::Int(v) => v as f64,
        }
    }
}

/// One row of model input, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<FeatureValue>);

impl FeatureVector {
    pub fn new(values: Vec<FeatureValue>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[FeatureValue] {
        &self.0
    }

    pub fn to_f64(&self) -> Vec<f64> {
        self.0.iter().map(FeatureValue::as_f64).collect()
    }
}
