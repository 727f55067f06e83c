use std::fmt::{self, Write};

use bitflags::Flags;
use classkit::jvm::{
    bytecode::ClassFile,
    class::{AccessFlags, Attributes, Constants, MemberContext, Members},
    constant_pool::Entry,
};
use thiserror::Error;

/// A class file that decodes but cannot be summarized.
#[derive(Debug, Error)]
pub(crate) enum SummaryError {
    #[error("constant #{index} is not a {expected}")]
    Unresolved { index: u16, expected: &'static str },
    #[error("failed to render the summary")]
    Render(#[from] fmt::Error),
}

/// Renders the summary of a decoded class file.
/// Indices are checked here, so a dangling index is an error rather than a panic.
pub(crate) fn summarize(class_file: &ClassFile) -> Result<String, SummaryError> {
    let class = class_file.view();
    let constants = class.constants();
    let mut out = String::new();
    writeln!(out, "  version: {}", class.version())?;
    writeln!(out, "  flags: {}", flags(&class.access_flags()))?;
    let this_class = class_name(constants, class.this_class().index())?;
    writeln!(out, "  this class: {this_class}")?;
    let super_class = match class.super_class() {
        Some(it) => class_name(constants, it.index())?,
        None => String::new(),
    };
    writeln!(out, "  super class: {}", or_none(super_class))?;
    let interfaces = class
        .interfaces()
        .iter()
        .map(|it| class_name(constants, it.index()))
        .collect::<Result<Vec<_>, _>>()?;
    writeln!(out, "  interfaces: {}", or_none(interfaces.join(", ")))?;
    members(&mut out, constants, "fields", class.fields())?;
    members(&mut out, constants, "methods", class.methods())?;
    let attributes = attribute_names(constants, class.attributes())?;
    writeln!(out, "  attributes: {attributes}")?;
    Ok(out)
}

fn members<F: MemberContext>(
    out: &mut String,
    constants: Constants<'_>,
    title: &str,
    members: Members<'_, F>,
) -> Result<(), SummaryError> {
    if members.is_empty() {
        writeln!(out, "  {title}: (none)")?;
        return Ok(());
    }
    writeln!(out, "  {title}:")?;
    for member in members.iter() {
        writeln!(
            out,
            "    {}: {} [{}] attributes: {}",
            utf8(constants, member.name_info().index())?,
            utf8(constants, member.descriptor_info().index())?,
            flags(&member.access_flags()),
            attribute_names(constants, member.attributes())?,
        )?;
    }
    Ok(())
}

fn utf8(constants: Constants<'_>, index: u16) -> Result<String, SummaryError> {
    constants
        .utf8(index)
        .map(|it| it.text().into_owned())
        .ok_or(SummaryError::Unresolved {
            index,
            expected: "CONSTANT_Utf8",
        })
}

fn class_name(constants: Constants<'_>, index: u16) -> Result<String, SummaryError> {
    match constants.get(index) {
        Some(&Entry::Class { name_index }) => utf8(constants, name_index),
        _ => Err(SummaryError::Unresolved {
            index,
            expected: "CONSTANT_Class",
        }),
    }
}

fn flags<F: Flags<Bits = u16>>(flags: &AccessFlags<'_, F>) -> String {
    or_none(flags.to_string())
}

fn attribute_names(
    constants: Constants<'_>,
    attributes: Attributes<'_>,
) -> Result<String, SummaryError> {
    let names = attributes
        .iter()
        .map(|it| utf8(constants, it.name_info().index()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(or_none(names.join(", ")))
}

fn or_none(text: String) -> String {
    if text.is_empty() {
        "(none)".to_owned()
    } else {
        text
    }
}
