use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// Property bag of a vertex or edge, including its reserved `_` keys
pub type Properties = HashMap<String, Value>;

pub const ID_KEY: &str = "_id";
pub const TYPE_KEY: &str = "_type";
pub const OUT_V_KEY: &str = "_outV";
pub const IN_V_KEY: &str = "_inV";
pub const LABEL_KEY: &str = "_label";
pub const ACTION_KEY: &str = "_action";

/// Common accessors of vertices and edges.
pub trait GraphElement {
    /// Value of the `_type` discriminator for this kind of element
    const ELEMENT_TYPE: &'static str;

    fn from_properties(properties: Properties) -> Self;

    fn properties(&self) -> &Properties;

    /// `_id` rendered as a string. Numeric ids use serde_json's decimal
    /// form; a missing or null id is the empty string.
    fn id(&self) -> String {
        match self.properties().get(ID_KEY) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// String property at `key`, or `""` if absent or not a string.
    /// Other value types are not coerced; read `properties()` for those.
    fn get(&self, key: &str) -> &str {
        string_property(self.properties(), key)
    }
}

fn string_property<'a>(properties: &'a Properties, key: &str) -> &'a str {
    match properties.get(key) {
        Some(Value::String(s)) => s,
        _ => "",
    }
}

fn has_type(object: &Map<String, Value>, element_type: &str) -> bool {
    matches!(object.get(TYPE_KEY), Some(Value::String(t)) if t == element_type)
}

/// Vertex represents a graph node as a property bag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vertex {
    properties: Properties,
}

impl Vertex {
    /// Build a vertex from `properties` (or an empty map) with `_id` set
    pub fn new(id: impl Into<String>, properties: Option<Properties>) -> Self {
        let mut properties = properties.unwrap_or_default();
        properties.insert(ID_KEY.to_string(), Value::String(id.into()));
        Self { properties }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    pub fn into_properties(self) -> Properties {
        self.properties
    }
}

impl GraphElement for Vertex {
    const ELEMENT_TYPE: &'static str = "vertex";

    fn from_properties(properties: Properties) -> Self {
        Self { properties }
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }
}

/// Edge represents a directed, labeled connection between two vertices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Edge {
    properties: Properties,
}

impl Edge {
    /// Build an edge from `properties` (or an empty map) with `_id`,
    /// `_outV`, `_label` and `_inV` set
    pub fn new(
        id: impl Into<String>,
        out_v: impl Into<String>,
        in_v: impl Into<String>,
        label: impl Into<String>,
        properties: Option<Properties>,
    ) -> Self {
        let mut properties = properties.unwrap_or_default();
        properties.insert(ID_KEY.to_string(), Value::String(id.into()));
        properties.insert(OUT_V_KEY.to_string(), Value::String(out_v.into()));
        properties.insert(LABEL_KEY.to_string(), Value::String(label.into()));
        properties.insert(IN_V_KEY.to_string(), Value::String(in_v.into()));
        Self { properties }
    }

    pub fn out_v(&self) -> &str {
        string_property(&self.properties, OUT_V_KEY)
    }

    pub fn in_v(&self) -> &str {
        string_property(&self.properties, IN_V_KEY)
    }

    pub fn label(&self) -> &str {
        string_property(&self.properties, LABEL_KEY)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    pub fn into_properties(self) -> Properties {
        self.properties
    }
}

impl GraphElement for Edge {
    const ELEMENT_TYPE: &'static str = "edge";

    fn from_properties(properties: Properties) -> Self {
        Self { properties }
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }
}

/// Either kind of graph element
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Vertex(Vertex),
    Edge(Edge),
}

impl Element {
    pub fn id(&self) -> String {
        match self {
            Element::Vertex(v) => v.id(),
            Element::Edge(e) => e.id(),
        }
    }

    pub fn element_type(&self) -> &'static str {
        match self {
            Element::Vertex(_) => Vertex::ELEMENT_TYPE,
            Element::Edge(_) => Edge::ELEMENT_TYPE,
        }
    }

    pub fn properties(&self) -> &Properties {
        match self {
            Element::Vertex(v) => v.properties(),
            Element::Edge(e) => e.properties(),
        }
    }
}

impl From<Vertex> for Element {
    fn from(v: Vertex) -> Self {
        Element::Vertex(v)
    }
}

impl From<Edge> for Element {
    fn from(e: Edge) -> Self {
        Element::Edge(e)
    }
}

/// Shape of the `results` field of a response, decoded once
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Results {
    #[default]
    Empty,
    Object(Properties),
    Array(Vec<Value>),
    Scalar(Value),
}

impl From<Value> for Results {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Results::Empty,
            Value::Object(map) => Results::Object(map.into_iter().collect()),
            Value::Array(items) => Results::Array(items),
            scalar => Results::Scalar(scalar),
        }
    }
}

impl From<Results> for Value {
    fn from(results: Results) -> Self {
        match results {
            Results::Empty => Value::Null,
            Results::Object(properties) => Value::Object(properties.into_iter().collect()),
            Results::Array(items) => Value::Array(items),
            Results::Scalar(value) => value,
        }
    }
}

impl Results {
    fn single<T: GraphElement>(&self) -> Option<T> {
        match self {
            Results::Object(properties)
                if string_property(properties, TYPE_KEY) == T::ELEMENT_TYPE =>
            {
                Some(T::from_properties(properties.clone()))
            }
            _ => None,
        }
    }

    // Any element of the wrong shape discards the whole array
    fn all<T: GraphElement>(&self) -> Option<Vec<T>> {
        let Results::Array(items) = self else {
            return None;
        };
        items
            .iter()
            .map(|item| match item {
                Value::Object(object) if has_type(object, T::ELEMENT_TYPE) => Some(
                    T::from_properties(object.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
                ),
                _ => None,
            })
            .collect()
    }

    /// The single vertex, if the results are exactly one vertex object
    pub fn as_vertex(&self) -> Option<Vertex> {
        self.single()
    }

    /// Every element, if the results are an array made only of vertices
    pub fn as_vertices(&self) -> Option<Vec<Vertex>> {
        self.all()
    }

    pub fn as_edge(&self) -> Option<Edge> {
        self.single()
    }

    pub fn as_edges(&self) -> Option<Vec<Edge>> {
        self.all()
    }

    pub fn scalar(&self) -> Option<&Value> {
        match self {
            Results::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Results::Empty)
    }
}

/// Response is the envelope of every successful (200) reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    pub results: Results,
    pub success: bool,
    pub version: String,
    #[serde(rename = "queryTime")]
    pub query_time: f64,
}

impl Response {
    /// Take each envelope field on its own, so a field of an unexpected
    /// type only loses that field
    pub fn from_value(mut value: Value) -> Self {
        let results = value
            .get_mut("results")
            .map(Value::take)
            .unwrap_or_default();
        Self {
            results: Results::from(results),
            success: value
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or_default(),
            version: value
                .get("version")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            query_time: value
                .get("queryTime")
                .and_then(Value::as_f64)
                .unwrap_or_default(),
        }
    }

    pub fn vertex(&self) -> Option<Vertex> {
        self.results.as_vertex()
    }

    pub fn vertices(&self) -> Option<Vec<Vertex>> {
        self.results.as_vertices()
    }

    pub fn edge(&self) -> Option<Edge> {
        self.results.as_edge()
    }

    pub fn edges(&self) -> Option<Vec<Edge>> {
        self.results.as_edges()
    }
}

/// ErrorResponse is the body of every non-200 reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}

impl ErrorResponse {
    /// Field-by-field like [`Response::from_value`]. A non-string
    /// `message` or `error` is kept in its JSON form.
    pub fn from_value(value: Value) -> Self {
        Self {
            message: text_field(&value, "message"),
            error: text_field(&value, "error"),
        }
    }

    /// `message` and `error` joined by a space, trimmed
    pub fn combined_message(&self) -> String {
        format!("{} {}", self.message, self.error).trim().to_string()
    }
}

fn text_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// TxActionType is the `_action` of one batch entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TxActionType {
    Create,
    Update,
    Delete,
}

impl TxActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxActionType::Create => "create",
            TxActionType::Update => "update",
            TxActionType::Delete => "delete",
        }
    }
}

/// TxAction is one element mutation inside a batch transaction
#[derive(Debug, Clone, PartialEq)]
pub struct TxAction {
    pub item: Element,
    pub action: TxActionType,
}

impl TxAction {
    pub fn new(item: impl Into<Element>, action: TxActionType) -> Self {
        Self {
            item: item.into(),
            action,
        }
    }

    pub fn create(item: impl Into<Element>) -> Self {
        Self::new(item, TxActionType::Create)
    }

    pub fn update(item: impl Into<Element>) -> Self {
        Self::new(item, TxActionType::Update)
    }

    /// The JSON object submitted for this action: the item's properties
    /// plus `_id` (when non-empty), `_type` and `_action`
    pub fn to_tx_entry(&self) -> Value {
        let mut entry: Map<String, Value> = self
            .item
            .properties()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let id = self.item.id();
        if !id.is_empty() {
            entry.insert(ID_KEY.to_string(), Value::String(id));
        }
        entry.insert(
            TYPE_KEY.to_string(),
            Value::String(self.item.element_type().to_string()),
        );
        entry.insert(
            ACTION_KEY.to_string(),
            Value::String(self.action.as_str().to_string()),
        );
        Value::Object(entry)
    }
}

/// KeyIndexType selects vertex or edge key indices
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeyIndexType {
    Vertex,
    Edge,
}

impl KeyIndexType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyIndexType::Vertex => Vertex::ELEMENT_TYPE,
            KeyIndexType::Edge => Edge::ELEMENT_TYPE,
        }
    }
}

impl fmt::Display for KeyIndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
