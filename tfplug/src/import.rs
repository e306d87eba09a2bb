//! Import helpers

use crate::context::Context;
use crate::resource::{ImportResourceStateRequest, ImportResourceStateResponse, ImportedResource};
use crate::types::{AttributePath, Diagnostic, DynamicValue};

/// Writes the import ID straight into one state attribute.
///
/// Example: `terraform import scaffolding_example.x abc` -> state.id = "abc".
/// Read then fills in the rest of the state.
pub fn import_state_passthrough_id(
    _ctx: &Context,
    attr_path: AttributePath,
    request: &ImportResourceStateRequest,
    response: &mut ImportResourceStateResponse,
) {
    let mut state = DynamicValue::object(Vec::<(String, _)>::new());

    if let Err(e) = state.set_string(&attr_path, request.id.clone()) {
        response.diagnostics.push(
            Diagnostic::error(
                "Failed to set import ID",
                format!("Could not set attribute {} to the import ID: {}", attr_path, e),
            )
            .with_attribute(attr_path),
        );
        return;
    }

    response.imported_resources.push(ImportedResource {
        type_name: request.type_name.clone(),
        state,
    });
}
