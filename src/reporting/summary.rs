// src/reporting/summary.rs
use std::fmt::Write;

use colored::Colorize;

use crate::network::Forest;

#[must_use]
pub fn render_summary(forest: &Forest) -> String {
    let s = forest.stats();
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Referral network".bold());
    let _ = writeln!(out, "  total       {}", s.total);
    let _ = writeln!(out, "  recruiters  {} ({} placeholder)", s.recruiters, s.virtual_recruiters);
    let _ = writeln!(out, "  leads       {}", s.leads);
    let orphans = if s.orphans > 0 {
        s.orphans.to_string().yellow().to_string()
    } else {
        s.orphans.to_string()
    };
    let _ = writeln!(out, "  unlinked    {orphans}");
    if let Some(root) = forest.primary_root() {
        let _ = writeln!(out, "  root        {} ({})", root.name(), root.id());
    }
    let _ = writeln!(out, "  fingerprint {}", forest.fingerprint().dimmed());
    out
}
