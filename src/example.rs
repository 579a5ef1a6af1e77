use crate::{
    args,
    mesh,
    sim,
    err_str,
    DikertResult,
};
use strum::IntoEnumIterator;

/// Macro for constructing a full stage config from the method and stage.
macro_rules! construct_stage_cfg {
    (mesh, $method:expr) => {
        mesh::MeshTarget{
            method: $method,
            ..mesh::MeshTarget::default()
        }
    };
    (sim, $method:expr) => {
        sim::SimTarget{
            method: $method,
            ..sim::SimTarget::default()
        }
    };
}

/// Macro for rendering the full config for a stage with methods.
/// Lists the available methods when no method is named.
macro_rules! render_stage_cfg {
    ($stage:ident, $target_method_name:expr, $cfg_format:expr) => {{
        let method_names: Vec<String> = $stage::MethodEnum::iter().map(|method| method.as_ref().to_string()).collect();
        let available_methods_str = format!("Available methods:\n    {}", method_names.join("\n    "));
        match $target_method_name {
            None => available_methods_str,
            Some(target_method_name) => {
                match $stage::MethodEnum::iter().find(|method| method.as_ref() == target_method_name) {
                    Some(method) => {
                        let stage_cfg = construct_stage_cfg!($stage, method);
                        crate::io::cfg_to_string(&stage_cfg, $cfg_format)?
                    },
                    None => {
                        return err_str(&format!("Method \"{}\" not found. {}", target_method_name, available_methods_str));
                    },
                }
            },
        }
    }};
}

/// Render an example config file for a stage (or the method list for stages with methods).
pub fn render_config(example_args: &args::ExampleArgs) -> DikertResult<String> {
    let method = example_args.method.as_deref();
    let format = &example_args.format;

    if method.is_some() && !matches!(example_args.stage, args::CfgSection::Mesh | args::CfgSection::Sim) {
        return err_str("Only the mesh and sim stages have methods");
    }

    let rendered = match example_args.stage {
        args::CfgSection::Survey => crate::io::cfg_to_string(&crate::survey::SurveyCfg::default(), format)?,
        args::CfgSection::Elecs => crate::io::cfg_to_string(&crate::elecs::ElecsTarget::default(), format)?,
        args::CfgSection::Mesh => render_stage_cfg!(mesh, method, format),
        args::CfgSection::Scheme => crate::io::cfg_to_string(&crate::scheme::SchemeTarget::default(), format)?,
        args::CfgSection::Sim => render_stage_cfg!(sim, method, format),
    };
    Ok(rendered)
}

/// Display an example config file for a stage.
/// Returns a `DikertResult` with `()` or an `Err`.
pub fn display_config(example_args: args::ExampleArgs) -> DikertResult<()> {
    println!("{}", render_config(&example_args)?);
    Ok(())
}
