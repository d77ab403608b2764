//! Plan file serialization.
//!
//! Emitted shape:
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <TestPlan version="1.0">
//!   <Entry uri="android.app"/>
//!   <Entry uri="android.net" exclude="cts.DnsTest#testDnsWorks"/>
//! </TestPlan>
//! ```
//! Per-test restriction becomes an `include` attribute, per-test exclusion
//! from a whole package an `exclude` attribute, both `;`-joined.

use crate::planner::error::PlanError;
use crate::planner::plan::{Selection, TestPlan};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::fs;
use std::path::Path;

pub fn write_plan(plan: &TestPlan, version: &str, path: &Path) -> Result<(), PlanError> {
    let body = serialize_plan(plan, version)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn serialize_plan(plan: &TestPlan, version: &str) -> Result<Vec<u8>, PlanError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("TestPlan");
    root.push_attribute(("version", version));
    writer.write_event(Event::Start(root))?;

    for (package, selection) in plan.entries() {
        let mut entry = BytesStart::new("Entry");
        entry.push_attribute(("uri", package));
        match selection {
            Selection::All { excluded_tests } if !excluded_tests.is_empty() => {
                entry.push_attribute(("exclude", excluded_tests.join(";").as_str()));
            }
            Selection::All { .. } => {}
            Selection::Tests(tests) => {
                entry.push_attribute(("include", tests.join(";").as_str()));
            }
        }
        writer.write_event(Event::Empty(entry))?;
    }

    writer.write_event(Event::End(BytesEnd::new("TestPlan")))?;

    let mut body = writer.into_inner();
    body.push(b'\n');
    Ok(body)
}
