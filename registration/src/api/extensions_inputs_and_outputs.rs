use serde_json::{Map, Value};

pub type AuthenticationExtensionsClientInputs = Map<String, Value>;

/// Whatever `getClientExtensionResults()` hands back; never interpreted here.
pub type AuthenticationExtensionsClientOutputs = Map<String, Value>;
