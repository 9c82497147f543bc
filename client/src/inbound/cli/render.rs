//! Plain-text rendering for terminal output.

use std::io::{self, Write};

use child_directory::SupportedChild;

use crate::domain::HomeView;

pub(super) fn write_home(out: &mut impl Write, view: &HomeView) -> io::Result<()> {
    writeln!(out, "{}", view.greeting())?;
    writeln!(out)?;
    write_children(out, view.children())
}

pub(super) fn write_children(out: &mut impl Write, children: &[SupportedChild]) -> io::Result<()> {
    writeln!(
        out,
        "{:>3}  {:<22} {:>3}  {:<8} {:<18} {}",
        "ID", "NAME", "AGE", "GENDER", "SCHOOL", "LEVEL"
    )?;
    for child in children {
        writeln!(
            out,
            "{:>3}  {:<22} {:>3}  {:<8} {:<18} {}",
            child.id,
            child.full_name(),
            child.age,
            child.gender.to_string(),
            child.school.school,
            child.school.level
        )?;
    }
    Ok(())
}

pub(super) fn write_children_json(
    out: &mut impl Write,
    children: &[SupportedChild],
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, children)?;
    writeln!(out)
}
