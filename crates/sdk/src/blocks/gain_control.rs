//! Camera gain control blocks.
//!
//! JavaScript calls go through the `gainControl` access object with the
//! control as first argument; Java calls the method on the control itself.

use super::style::{FUNCTION_COLOUR, GAIN_CONTROL};
use ftcblocks_core::{
    BlockKind, BlockRegistry, BlockView, Emitters, Field, Fragment, Imports, Lookup, Precedence,
    RegistryError, Socket, call,
};

const FAMILY: &str = "gainControl";

/// Registers every gain control kind.
pub fn register(registry: &mut BlockRegistry) -> Result<(), RegistryError> {
    registry.register(
        getter("getMinGain", "Returns the minimum supported gain."),
        Emitters::native(get_min_gain_js, get_min_gain_java),
    )?;
    registry.register(
        getter("getMaxGain", "Returns the maximum supported gain."),
        Emitters::native(get_max_gain_js, get_max_gain_java),
    )?;
    registry.register(
        getter("getGain", "Returns the current gain."),
        Emitters::native(get_gain_js, get_gain_java),
    )?;
    registry.register(set_gain_kind(), Emitters::native(set_gain_js, set_gain_java))?;
    Ok(())
}

fn header(kind: BlockKind, method: &str) -> BlockKind {
    kind.category(GAIN_CONTROL)
        .colour(FUNCTION_COLOUR)
        .field(Field::label("call"))
        .field(Field::non_editable("GainControl"))
        .field(Field::label("."))
        .field(Field::non_editable(method))
        .socket(Socket::new("GAIN_CONTROL", "gainControl").check("GainControl"))
}

fn getter(method: &str, tooltip: &str) -> BlockKind {
    header(
        BlockKind::value(format!("{}_{}", FAMILY, method), Some("Number")),
        method,
    )
    .tooltip(Lookup::fixed(tooltip))
    .java_output("int")
    .java_input("GAIN_CONTROL", "GainControl")
}

fn set_gain_kind() -> BlockKind {
    header(
        BlockKind::value("gainControl_setGain", Some("Boolean")),
        "setGain",
    )
    .toggleable()
    .socket(Socket::new("GAIN", "gain").check("Number"))
    .tooltip(Lookup::fixed(
        "Sets the gain. Returns true if the gain was applied.",
    ))
    .java_output("boolean")
    .java_input("GAIN_CONTROL", "GainControl")
    .java_input("GAIN", "int")
}

fn access_call(view: &BlockView<'_>, method: &str, sockets: &[&str]) -> Fragment {
    let args = view.values(sockets, Precedence::Comma);
    Fragment::new(
        call(&view.identifier(FAMILY), method, &args),
        Precedence::FunctionCall,
    )
}

fn member_call(view: &BlockView<'_>, method: &str, sockets: &[&str]) -> Fragment {
    let control = view.value("GAIN_CONTROL", Precedence::Member);
    let args = view.values(sockets, Precedence::Comma);
    Fragment::new(call(&control, method, &args), Precedence::FunctionCall)
}

fn get_min_gain_js(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    access_call(view, "getMinGain", &["GAIN_CONTROL"])
}

fn get_min_gain_java(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    member_call(view, "getMinGain", &[])
}

fn get_max_gain_js(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    access_call(view, "getMaxGain", &["GAIN_CONTROL"])
}

fn get_max_gain_java(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    member_call(view, "getMaxGain", &[])
}

fn get_gain_js(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    access_call(view, "getGain", &["GAIN_CONTROL"])
}

fn get_gain_java(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    member_call(view, "getGain", &[])
}

fn set_gain_js(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    access_call(view, "setGain", &["GAIN_CONTROL", "GAIN"])
}

fn set_gain_java(view: &BlockView<'_>, _: &mut Imports) -> Fragment {
    member_call(view, "setGain", &["GAIN"])
}
