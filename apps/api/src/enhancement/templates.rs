//! Fixed phrase tables for template enhancement, keyed by resume section.

use rand::Rng;

use super::Section;

/// Lead-in phrases placed before a lowercased summary.
pub const SUMMARY_LEAD_INS: [&str; 4] = [
    "Results-driven professional with proven expertise in",
    "Accomplished specialist with extensive experience in",
    "Dynamic leader with a track record of success in",
    "Innovative problem-solver with deep knowledge of",
];

/// Closing sentence appended to every enhanced summary.
pub const SUMMARY_CLOSING: &str =
    "Demonstrated ability to drive innovation and deliver exceptional results in fast-paced environments.";

/// Elaboration sentences appended after an experience description.
pub const EXPERIENCE_ELABORATIONS: [&str; 4] = [
    "Successfully led cross-functional teams to deliver high-impact projects, resulting in significant improvements to system performance and user experience.",
    "Spearheaded the development and implementation of scalable solutions, driving operational efficiency and reducing costs by implementing best practices.",
    "Collaborated with stakeholders to identify opportunities for process optimization, leading to measurable improvements in productivity and quality.",
    "Mentored junior developers and established coding standards that improved code quality and reduced technical debt across multiple projects.",
];

const OTHER_PREFIX: &str = "Enhanced:";

fn pick<'a, R: Rng + ?Sized>(phrases: &[&'a str], rng: &mut R) -> &'a str {
    phrases[rng.gen_range(0..phrases.len())]
}

/// Renders the templated rewrite of `content` for `section`.
/// Assumes `content` was already checked for blankness.
pub fn render<R: Rng + ?Sized>(section: &Section, content: &str, rng: &mut R) -> String {
    match section {
        Section::Summary => {
            let lead_in = pick(&SUMMARY_LEAD_INS, rng);
            format!(
                "{lead_in} {}. {SUMMARY_CLOSING}",
                content.to_lowercase()
            )
        }
        Section::Experience => {
            let elaboration = pick(&EXPERIENCE_ELABORATIONS, rng);
            format!("{content} {elaboration}")
        }
        Section::Other => format!("{OTHER_PREFIX} {content}"),
    }
}
