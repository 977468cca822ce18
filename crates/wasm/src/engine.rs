use aviary_core::engine::{Engine, decode_world};
use aviary_core::{EngineError, WorldSnapshot};
use js_sys::{Function, JSON, Reflect};
use wasm_bindgen::{JsCast, JsValue};

/// Adapts a JS simulation object exposing `step()`, `train()`, `ticks()`
/// and `world()` to [`Engine`].
pub struct JsEngine {
    inner: JsValue,
}

impl JsEngine {
    pub fn new(inner: JsValue) -> Self {
        Self { inner }
    }

    fn call(&self, method: &'static str) -> Result<JsValue, EngineError> {
        let func = Reflect::get(&self.inner, &JsValue::from_str(method))
            .map_err(|e| EngineError::call(method, describe(&e)))?;
        let func: Function = func
            .dyn_into()
            .map_err(|v| EngineError::unexpected(method, format!("not a function: {}", describe(&v))))?;
        func.call0(&self.inner)
            .map_err(|e| EngineError::call(method, describe(&e)))
    }
}

impl Engine for JsEngine {
    fn step(&mut self) -> Result<bool, EngineError> {
        let value = self.call("step")?;
        value
            .as_bool()
            .ok_or_else(|| EngineError::unexpected("step", describe(&value)))
    }

    fn train(&mut self) -> Result<bool, EngineError> {
        Ok(self.call("train")?.is_truthy())
    }

    fn ticks(&self) -> Result<u64, EngineError> {
        let value = self.call("ticks")?;
        match value.as_f64() {
            Some(n) if n.is_finite() && n >= 0.0 => Ok(n as u64),
            _ => Err(EngineError::unexpected("ticks", describe(&value))),
        }
    }

    fn world(&self) -> Result<WorldSnapshot, EngineError> {
        let value = self.call("world")?;
        let json = JSON::stringify(&value)
            .map_err(|e| EngineError::call("world", describe(&e)))?
            .as_string()
            .ok_or_else(|| EngineError::unexpected("world", describe(&value)))?;
        Ok(decode_world(&json)?.snapshot)
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
