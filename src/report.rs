//! Renders structured results as report text.
//!
//! Nothing in here computes; every section takes a finished structure
//! from the engine and lays it out. Keeping the prose on this side of
//! the boundary is what keeps the scoring testable.

use crate::divination::{Cast, DrawnCard};
use crate::scoring;
use crate::{BloodType, ChartReport, ElementRelation, MarriagePalace, MatchScore, NameChart};
use std::fmt::Write;

const RULE: &str = "==================================================";

fn bar(count: u32) -> String {
    "\u{2588}".repeat(count as usize)
}

/// The four-pillars section for one person.
pub fn chart_text(report: &ChartReport) -> String {
    let mut out = String::new();
    writeln!(out, "{}", RULE).unwrap();
    writeln!(out, "Four Pillars Chart").unwrap();
    writeln!(out, "{}", RULE).unwrap();
    writeln!(out, "Born: {}", report.moment).unwrap();
    writeln!(out, "Animal: {}   Zodiac: {}   Rising: {}",
        report.animal, report.zodiac, report.ascendant).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Pillars:").unwrap();
    writeln!(out, "  year:  {}", report.pillars.year).unwrap();
    writeln!(out, "  month: {}", report.pillars.month).unwrap();
    writeln!(out, "  day:   {}", report.pillars.day).unwrap();
    writeln!(out, "  hour:  {}", report.pillars.hour).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Elements:").unwrap();
    for (element, count) in report.tally.entries() {
        let share = count as f64 / report.tally.total() as f64 * 100.0;
        writeln!(out, "  {:<5} {} ({} of 8, {:.1}%)", element.to_string(), bar(count), count, share)
            .unwrap();
    }
    writeln!(out).unwrap();
    if report.balanced {
        writeln!(out, "The five elements sit in rough balance; a steady chart.").unwrap();
    } else {
        writeln!(
            out,
            "The elements lean toward {}; {} runs short and is worth reinforcing.",
            report.tally.dominant(),
            report.tally.weakest()
        )
        .unwrap();
    }
    if report.branch_conflicts.is_empty() {
        writeln!(out, "No branch clashes among the pillars; a harmonious chart.").unwrap();
    } else {
        for (a, b) in &report.branch_conflicts {
            writeln!(out, "Clash: {} against {} - expect friction or change.", a, b).unwrap();
        }
    }
    writeln!(out).unwrap();
    writeln!(
        out,
        "Day master {} ({}): {}.",
        report.day_master,
        report.day_master.element(),
        report.day_master.temperament()
    )
    .unwrap();
    writeln!(out, "Year nayin element: {}.", report.nayin).unwrap();
    let palace = match report.marriage_palace {
        MarriagePalace::Auspicious => "favourably placed",
        MarriagePalace::Fair => "calm",
        MarriagePalace::Adverse => "under strain and worth attention",
    };
    writeln!(out, "Marriage palace ({}): {}.", report.pillars.day.branch, palace).unwrap();
    out
}

/// The five-grid section for one name.
pub fn name_text(chart: &NameChart) -> String {
    let mut out = String::new();
    writeln!(out, "{}", RULE).unwrap();
    writeln!(out, "Five Grids for {}", chart.name).unwrap();
    writeln!(out, "{}", RULE).unwrap();
    writeln!(out, "Strokes:").unwrap();
    for stroke in &chart.strokes {
        let origin = match stroke.source {
            crate::StrokeSource::Dictionary => "",
            crate::StrokeSource::Estimated => " (estimated)",
        };
        writeln!(out, "  {} : {}{}", stroke.character, stroke.strokes, origin).unwrap();
    }
    writeln!(out).unwrap();
    for (label, value) in [
        ("heaven", chart.grid.heaven),
        ("human", chart.grid.human),
        ("earth", chart.grid.earth),
        ("outer", chart.grid.outer),
        ("total", chart.grid.total),
    ] {
        let tier = crate::LuckTier::classify(value);
        let element = scoring::number_element(value);
        write!(out, "  {:<6} {:>3}  {:<7} {}", label, value, element.to_string(), tier).unwrap();
        if let Some(meaning) = scoring::number_meaning(value) {
            write!(out, " - {}", meaning).unwrap();
        }
        writeln!(out).unwrap();
    }
    out
}

/// The pairwise comparison section for two names.
pub fn match_text(a: &NameChart, b: &NameChart, score: &MatchScore) -> String {
    let mut out = String::new();
    writeln!(out, "{}", RULE).unwrap();
    writeln!(out, "Name Compatibility: {} and {}", a.name, b.name).unwrap();
    writeln!(out, "{}", RULE).unwrap();
    for category in &score.categories {
        let r = &category.rationale;
        let relation = match r.relation {
            ElementRelation::Generates => "generate each other",
            ElementRelation::Same => "share one nature",
            ElementRelation::Conflicts => "work against each other",
        };
        writeln!(
            out,
            "  {:<11} {:>5.1}  (weight {:.0}%)",
            category.category.to_string(),
            category.score,
            category.weight * 100.0
        )
        .unwrap();
        writeln!(
            out,
            "    {} ({}, {}) vs {} ({}, {}): {} and {}",
            r.value_a, r.element_a, r.luck_a, r.value_b, r.element_b, r.luck_b, relation,
            verdict_fragment(category.score)
        )
        .unwrap();
    }
    writeln!(out).unwrap();
    writeln!(out, "Overall: {:.1} / 100 - {}", score.overall, overall_verdict(score.overall))
        .unwrap();
    out
}

fn verdict_fragment(score: f64) -> &'static str {
    if score >= 80.0 {
        "the pairing runs smooth"
    } else if score >= 60.0 {
        "workable with care"
    } else {
        "friction to be managed"
    }
}

fn overall_verdict(score: f64) -> &'static str {
    if score >= 80.0 {
        "a strong match"
    } else if score >= 70.0 {
        "a good match"
    } else if score >= 60.0 {
        "an acceptable match with effort"
    } else {
        "a difficult pairing; patience required"
    }
}

/// The blood-type affinity section.
pub fn blood_text(a: BloodType, b: BloodType) -> String {
    let mut out = String::new();
    writeln!(out, "{}", RULE).unwrap();
    writeln!(out, "Blood Type Affinity: {} and {}", a, b).unwrap();
    writeln!(out, "{}", RULE).unwrap();
    writeln!(out, "Type {} traits: {}", a, scoring::blood_traits(a).join(", ")).unwrap();
    writeln!(out, "Type {} traits: {}", b, scoring::blood_traits(b).join(", ")).unwrap();
    writeln!(out, "Affinity: {}%", scoring::blood_affinity(a, b)).unwrap();
    out
}

/// A three-card spread with its positions.
pub fn tarot_text(cards: &[DrawnCard]) -> String {
    let mut out = String::new();
    writeln!(out, "{}", RULE).unwrap();
    writeln!(out, "Tarot Spread").unwrap();
    writeln!(out, "{}", RULE).unwrap();
    let positions = ["past", "present", "future"];
    for (index, card) in cards.iter().enumerate() {
        let position = positions.get(index).copied().unwrap_or("card");
        writeln!(out, "  {:<8} {}", position, card).unwrap();
    }
    out
}

/// A hexagram cast, with the transformation when a line moves.
pub fn cast_text(cast: &Cast) -> String {
    let mut out = String::new();
    writeln!(out, "{}", RULE).unwrap();
    writeln!(out, "I Ching Cast").unwrap();
    writeln!(out, "{}", RULE).unwrap();
    writeln!(out, "Primary: {}", cast.primary).unwrap();
    let moving = cast.primary.moving_lines();
    if let Some(transformed) = &cast.transformed {
        let lines: Vec<String> = moving.iter().map(|p| (p + 1).to_string()).collect();
        writeln!(out, "Moving lines: {}", lines.join(", ")).unwrap();
        writeln!(out, "Becomes: {}", transformed).unwrap();
    } else {
        writeln!(out, "No moving lines; the situation holds.").unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::divination;
    use crate::{BirthMoment, ChartReport};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_chart_text_mentions_pillars() {
        let moment = BirthMoment::new(1990, 5, 15, 14).unwrap();
        let text = chart_text(&ChartReport::calculate(&moment));
        assert!(text.contains("Four Pillars Chart"));
        assert!(text.contains("year:"));
        assert!(text.contains("Day master"));
    }

    #[test]
    fn test_name_text_lists_grids() {
        let chart = NameChart::from_name("王小明").unwrap();
        let text = name_text(&chart);
        assert!(text.contains("heaven"));
        assert!(text.contains("total"));
        assert!(text.contains("王"));
    }

    #[test]
    fn test_match_text_reports_overall() {
        let a = NameChart::from_name("王小明").unwrap();
        let b = NameChart::from_name("李麗華").unwrap();
        let score = scoring::score_match(&a.grid, &b.grid);
        let text = match_text(&a, &b, &score);
        assert!(text.contains("Overall:"));
        assert!(text.contains("human grid"));
    }

    #[test]
    fn test_divination_sections_render() {
        let mut rng = StdRng::seed_from_u64(5);
        let cards = divination::draw_tarot(&mut rng, 3);
        assert!(tarot_text(&cards).contains("present"));
        let cast = divination::cast_hexagram(&mut rng);
        assert!(cast_text(&cast).contains("Primary: #"));
    }
}
