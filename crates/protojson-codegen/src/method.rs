//! HTTP stub generation for one service method.

use protojson_core::{CodegenError, CodegenResult, HttpBinding, MethodSpec, naming};

use crate::path::PathTemplate;
use crate::printer::{Printer, Vars};

/// Generates the stub for one method.
///
/// The stub takes one leading `String` per path parameter, then the request
/// and a completion callback, and hands the serialized request to the
/// service's `doCall` hook.
#[derive(Debug)]
pub struct MethodCodec<'a> {
    method: &'a MethodSpec,
    template: PathTemplate,
    vars: Vars,
}

impl<'a> MethodCodec<'a> {
    /// Validate the method's HTTP options and parse its path template.
    pub fn new(method: &'a MethodSpec) -> CodegenResult<Self> {
        let HttpBinding {
            method: verb,
            path,
        } = method
            .http
            .as_ref()
            .ok_or_else(|| CodegenError::MissingHttpOptions {
                method: method.name.clone(),
            })?;

        if verb.trim().is_empty() {
            return Err(CodegenError::MissingHttpOptions {
                method: method.name.clone(),
            });
        }

        let template = PathTemplate::parse(path).map_err(|e| e.into_codegen(&method.name, path))?;
        let path_args: String = template.params().map(|p| format!("String {p}, ")).collect();

        let vars = Vars::from([
            ("method_name", method.name.clone()),
            ("input_class", method.input_class.clone()),
            ("output_class", method.output_class.clone()),
            ("http_method", naming::escape_java_string(verb)),
            ("path_args", path_args),
            ("path_expr", template.java_expression()),
        ]);

        Ok(Self {
            method,
            template,
            vars,
        })
    }

    /// The parsed path template.
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// The method this codec generates for.
    pub fn method(&self) -> &'a MethodSpec {
        self.method
    }

    /// Write the stub method.
    pub fn generate(&self, p: &mut Printer<'_>) -> CodegenResult<()> {
        p.print(
            &self.vars,
            concat!(
                "public void $method_name$($path_args$$input_class$ req, final Callback<$output_class$> callback) {\n",
                "  String path = $path_expr$;\n",
                "  org.json.JSONObject params = null;\n",
                "  try {\n",
                "    params = req.toJSON();\n",
                "  } catch (org.json.JSONException e) {\n",
                "    callback.done(-1, \"JSON error: \" + e, null);\n",
                "    return;\n",
                "  }\n",
                "  this.doCall(path, \"$http_method$\", params, $output_class$.class, callback);\n",
                "}\n",
            ),
        )
    }
}
