use ftcblocks_core::{
    BlockRegistry, BlockView, FetchError, FetchResult, FieldValues, Precedence, ResolvedInputs,
    Shape, Target, install_generated_kinds,
};
use ftcblocks_sdk::{Generator, GeneratorConfig, Program, standard};
use js_sys::Array;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::BTreeMap;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

thread_local! {
    static REGISTRY: RefCell<BlockRegistry> = RefCell::new(standard().clone());
}

fn with_registry<T>(f: impl FnOnce(&BlockRegistry) -> T) -> T {
    REGISTRY.with(|registry| f(&registry.borrow()))
}

// ============================================================================
// Conversions
// ============================================================================

fn from_js<T: DeserializeOwned + Default>(value: JsValue, what: &str) -> Result<T, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid {}: {}", what, e)))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

fn parse_target(name: &str) -> Result<Target, JsError> {
    Target::parse(name).ok_or_else(|| JsError::new(&format!("Unknown target: {}", name)))
}

fn parse_shape(name: &str) -> Result<Shape, JsError> {
    match name {
        "" | "expression" => Ok(Shape::Expression),
        "statement" => Ok(Shape::Statement),
        other => Err(JsError::new(&format!("Unknown shape: {}", other))),
    }
}

fn names_array(names: &[String]) -> Array {
    names.iter().map(|name| JsValue::from_str(name)).collect()
}

/// Code the host already generated for one socket.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SocketInput {
    /// Generated code.
    pub code: String,
    /// Precedence of the code; literals default to atomic.
    #[serde(default = "atomic")]
    pub precedence: Precedence,
}

fn atomic() -> Precedence {
    Precedence::Atomic
}

// ============================================================================
// Registry API
// ============================================================================

/// Names of every registered block kind, sorted.
#[wasm_bindgen(js_name = block_names)]
pub fn block_names() -> Array {
    with_registry(|registry| {
        let names: Vec<String> = registry.names().map(str::to_string).collect();
        names_array(&names)
    })
}

/// Shape descriptor of a block kind, as a plain object.
#[wasm_bindgen]
pub fn describe(name: &str) -> Result<JsValue, JsError> {
    with_registry(|registry| {
        let kind = registry
            .describe(name)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(kind)
    })
}

/// Tooltip of a block kind for the given field values.
#[wasm_bindgen]
pub fn tooltip(name: &str, fields: JsValue) -> Result<String, JsError> {
    let fields: FieldValues = from_js(fields, "fields")?;
    with_registry(|registry| {
        registry
            .tooltip(name, &fields)
            .map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Java type of a block's output, or of one of its sockets when `socket` is given.
#[wasm_bindgen(js_name = java_type)]
pub fn java_type(
    name: &str,
    socket: Option<String>,
    fields: JsValue,
) -> Result<Option<String>, JsError> {
    let fields: FieldValues = from_js(fields, "fields")?;
    with_registry(|registry| {
        let ty = match socket {
            Some(socket) => registry.java_input_type(name, &socket, &fields),
            None => registry.java_output_type(name, &fields),
        };
        ty.map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Emits code for one block instance.
///
/// # Arguments
///
/// * `name` - Block kind name
/// * `fields` - Object of field name to stored value
/// * `inputs` - Object of socket name to `{code, precedence}`; missing sockets are empty
/// * `shape` - `"expression"` or `"statement"`
/// * `target` - `"javascript"` or `"java"`
/// * `config` - Optional generator configuration
///
/// # Example (JavaScript)
///
/// ```javascript
/// const out = emit("gainControl_setGain", {}, {
///   GAIN_CONTROL: { code: "gainControl" },
///   GAIN: { code: "50" },
/// }, "statement", "javascript");
/// // out = { emission: { type: "statement", code: "gainControlAccess.setGain(gainControl, 50);\n" }, imports: [] }
/// ```
#[wasm_bindgen]
pub fn emit(
    name: &str,
    fields: JsValue,
    inputs: JsValue,
    shape: &str,
    target: &str,
    config: JsValue,
) -> Result<JsValue, JsError> {
    let fields: FieldValues = from_js(fields, "fields")?;
    let sockets: BTreeMap<String, SocketInput> = from_js(inputs, "inputs")?;
    let config: GeneratorConfig = from_js(config, "config")?;
    let shape = parse_shape(shape)?;
    let target = parse_target(target)?;

    let mut resolved = ResolvedInputs::new();
    for (socket, input) in sockets {
        resolved.insert(socket, input.code, input.precedence);
    }

    with_registry(|registry| {
        let view = BlockView::new(&fields, &resolved)
            .with_shape(shape)
            .with_identifiers(&config.identifiers);
        let generated = registry
            .emit(name, &view, target)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&generated)
    })
}

/// Generates a whole serialized program.
#[wasm_bindgen]
pub fn generate(program: JsValue, target: &str, config: JsValue) -> Result<JsValue, JsError> {
    let program: Program = from_js(program, "program")?;
    let config: GeneratorConfig = from_js(config, "config")?;
    let target = parse_target(target)?;

    with_registry(|registry| {
        let generated = Generator::new(registry, &config)
            .generate(&program, target)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&generated)
    })
}

// ============================================================================
// Generated kinds
// ============================================================================

/// Registers generated kinds from JSON source text; returns their names.
#[wasm_bindgen(js_name = register_generated_kinds)]
pub fn register_generated_kinds(source: &str) -> Result<Array, JsError> {
    install(Ok(source.to_string()))
}

/// Feeds the outcome of the host's hardware fetch into the registry.
///
/// A fetch either succeeded with `payload` or failed with `error`/`status`;
/// passing both is rejected and nothing is registered. A status wins over a
/// message, and an empty payload is reported as an error.
#[wasm_bindgen(js_name = install_fetch_result)]
pub fn install_fetch_result(
    payload: Option<String>,
    error: Option<String>,
    status: Option<u16>,
) -> Result<Array, JsError> {
    if payload.is_some() && (error.is_some() || status.is_some()) {
        return Err(JsError::new("Fetch result carries both a payload and an error"));
    }
    let outcome = match (status, error) {
        (Some(code), _) => Err(FetchError::Status(code)),
        (None, Some(message)) => Err(FetchError::failed(message)),
        (None, None) => Ok(payload.unwrap_or_default()),
    };
    install(outcome)
}

fn install(outcome: FetchResult) -> Result<Array, JsError> {
    REGISTRY.with(|registry| {
        let names = install_generated_kinds(&mut registry.borrow_mut(), outcome)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(names_array(&names))
    })
}
