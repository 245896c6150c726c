//! Catalog handlers
//!
//! Each handler adapts one [`ClusterContext`] operation to positional JSON
//! arguments. Arity has already been checked by the namespace.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::Value;

use crate::cloud::gce;
use crate::config::InstanceGroup;
use crate::context::{self, ClusterContext};
use crate::error::{Error, Result};

/// Target architecture; templates may be rendered on a different host arch
pub const ARCHITECTURE: &str = "amd64";

fn string_arg<'a>(function: &str, args: &'a [Value], index: usize) -> Result<&'a str> {
    args.get(index).and_then(Value::as_str).ok_or_else(|| {
        Error::invalid_argument(function, format!("argument {index} must be a string"))
    })
}

fn string_list_arg<'a>(function: &str, args: &'a [Value], index: usize) -> Result<Vec<&'a str>> {
    let items = args.get(index).and_then(Value::as_array).ok_or_else(|| {
        Error::invalid_argument(function, format!("argument {index} must be a list of strings"))
    })?;

    items
        .iter()
        .map(|item| {
            item.as_str().ok_or_else(|| {
                Error::invalid_argument(
                    function,
                    format!("argument {index} must be a list of strings"),
                )
            })
        })
        .collect()
}

/// `null` is an absent value; anything else must be a boolean
fn optional_bool_arg(function: &str, args: &[Value], index: usize) -> Result<Option<bool>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(Error::invalid_argument(
            function,
            format!("argument {index} must be a boolean or null"),
        )),
    }
}

fn bool_arg(function: &str, args: &[Value], index: usize) -> Result<bool> {
    args.get(index).and_then(Value::as_bool).ok_or_else(|| {
        Error::invalid_argument(function, format!("argument {index} must be a boolean"))
    })
}

pub(super) fn shared_vpc(ctx: &ClusterContext, _args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(ctx.shared_vpc()))
}

pub(super) fn arch(_ctx: &ClusterContext, _args: &[Value]) -> Result<Value> {
    Ok(Value::from(ARCHITECTURE))
}

pub(super) fn base64_encode(_ctx: &ClusterContext, args: &[Value]) -> Result<Value> {
    let s = string_arg("Base64Encode", args, 0)?;
    Ok(Value::from(STANDARD.encode(s.as_bytes())))
}

pub(super) fn replace(_ctx: &ClusterContext, args: &[Value]) -> Result<Value> {
    let s = string_arg("replace", args, 0)?;
    let find = string_arg("replace", args, 1)?;
    let with = string_arg("replace", args, 2)?;
    Ok(Value::from(s.replace(find, with)))
}

pub(super) fn join(_ctx: &ClusterContext, args: &[Value]) -> Result<Value> {
    let items = string_list_arg("join", args, 0)?;
    let sep = string_arg("join", args, 1)?;
    Ok(Value::from(items.join(sep)))
}

pub(super) fn cluster_name(ctx: &ClusterContext, _args: &[Value]) -> Result<Value> {
    Ok(Value::from(ctx.cluster_name()))
}

pub(super) fn has_tag(ctx: &ClusterContext, args: &[Value]) -> Result<Value> {
    let tag = string_arg("HasTag", args, 0)?;
    Ok(Value::Bool(ctx.has_tag(tag)))
}

pub(super) fn image(ctx: &ClusterContext, args: &[Value]) -> Result<Value> {
    let component = string_arg("Image", args, 0)?;
    Ok(Value::from(ctx.image(component)?))
}

pub(super) fn with_default_bool(_ctx: &ClusterContext, args: &[Value]) -> Result<Value> {
    let value = optional_bool_arg("WithDefaultBool", args, 0)?;
    let default = bool_arg("WithDefaultBool", args, 1)?;
    Ok(Value::Bool(context::with_default_bool(value, default)))
}

pub(super) fn get_instance_group(ctx: &ClusterContext, args: &[Value]) -> Result<Value> {
    let name = string_arg("GetInstanceGroup", args, 0)?;
    Ok(serde_json::to_value(ctx.instance_group(name)?)?)
}

/// Accepts a group name or a group object as returned by `GetInstanceGroup`
pub(super) fn cloud_tags(ctx: &ClusterContext, args: &[Value]) -> Result<Value> {
    let tags = match args.first() {
        Some(Value::String(name)) => ctx.cloud_tags(ctx.instance_group(name)?),
        Some(group @ Value::Object(_)) => {
            let group: InstanceGroup = serde_json::from_value(group.clone())
                .map_err(|e| Error::invalid_argument("CloudTags", e.to_string()))?;
            ctx.cloud_tags(&group)
        }
        _ => {
            return Err(Error::invalid_argument(
                "CloudTags",
                "argument 0 must be an instance group or its name",
            ));
        }
    };
    Ok(serde_json::to_value(tags)?)
}

pub(super) fn kube_dns(ctx: &ClusterContext, _args: &[Value]) -> Result<Value> {
    Ok(serde_json::to_value(ctx.kube_dns())?)
}

pub(super) fn dns_controller_argv(ctx: &ClusterContext, _args: &[Value]) -> Result<Value> {
    let synthesis = ctx.dns_controller_argv()?;
    synthesis.log_diagnostics("dns-controller");
    Ok(serde_json::to_value(synthesis.into_argv())?)
}

pub(super) fn external_dns_argv(ctx: &ClusterContext, _args: &[Value]) -> Result<Value> {
    let synthesis = ctx.external_dns_argv()?;
    synthesis.log_diagnostics("external-dns");
    Ok(serde_json::to_value(synthesis.into_argv())?)
}

pub(super) fn encode_gce_label(_ctx: &ClusterContext, args: &[Value]) -> Result<Value> {
    let s = string_arg("EncodeGCELabel", args, 0)?;
    Ok(Value::from(gce::encode_gce_label(s)))
}

pub(super) fn decode_gce_label(_ctx: &ClusterContext, args: &[Value]) -> Result<Value> {
    let s = string_arg("DecodeGCELabel", args, 0)?;
    Ok(Value::from(gce::decode_gce_label(s)?))
}

pub(super) fn region(ctx: &ClusterContext, _args: &[Value]) -> Result<Value> {
    Ok(Value::from(ctx.region()))
}
