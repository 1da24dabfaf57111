//! Abstract HTTP client class per service.

use protojson_core::{CodegenError, ServiceSpec};
use tracing::{debug, warn};

use crate::method::MethodCodec;
use crate::printer::{Printer, Vars};

/// Generates `public static abstract class <Service>` with one stub per method.
///
/// Subclasses supply the transport by implementing `doCall`.
#[derive(Debug)]
pub struct ServiceCodec<'a> {
    service: &'a ServiceSpec,
    vars: Vars,
}

impl<'a> ServiceCodec<'a> {
    pub fn new(service: &'a ServiceSpec) -> Self {
        Self {
            service,
            vars: Vars::from([("service", service.name.clone())]),
        }
    }

    /// Write the service class, returning errors for methods that were skipped.
    pub fn generate(&self, p: &mut Printer<'_>) -> Vec<CodegenError> {
        debug!(service = %self.service.name, methods = self.service.methods.len(), "generating service");

        let mut errors = Vec::new();
        if let Err(err) = p.print(
            &self.vars,
            concat!(
                "public static abstract class $service$ {\n",
                "  public static interface Callback<T> {\n",
                "    void done(int code, String error, T response);\n",
                "  }\n",
                "\n",
                "  protected abstract <T> void doCall(\n",
                "      final String path,\n",
                "      final String httpMethod,\n",
                "      final org.json.JSONObject params,\n",
                "      final Class<T> responseType,\n",
                "      final Callback<T> callback);\n",
            ),
        ) {
            errors.push(err);
            return errors;
        }

        p.indent();
        for method in &self.service.methods {
            let generated = MethodCodec::new(method).and_then(|codec| {
                p.print_raw("\n");
                codec.generate(p)
            });
            if let Err(err) = generated {
                warn!(service = %self.service.name, method = %method.name, error = %err, "skipping method");
                errors.push(err);
            }
        }
        p.outdent();
        p.print_raw("}\n\n");

        errors
    }
}
