//! Classification and pairwise scoring over derived symbols.
//!
//! Everything here is a pure function of its inputs: the 81-number luck
//! tables, the generative element cycle, the branch harmony/clash tables
//! and the weighted grid comparison built on top of them.

use crate::{
    BloodType, BranchRelation, EarthlyBranch, Element, ElementRelation, FourPillars, GridCategory,
    GridRationale, GridScore, LuckTier, MarriagePalace, MatchScore, NameGrid,
};

const GREAT_FORTUNE_NUMBERS: &[u32] = &[
    1, 3, 5, 6, 7, 8, 11, 13, 15, 16, 17, 18, 21, 23, 24, 25, 29, 31, 32, 33, 35, 37, 39, 41, 45,
    47, 48, 52, 57, 61, 63, 65, 67, 68, 81,
];

const FORTUNE_NUMBERS: &[u32] = &[
    14, 19, 30, 38, 40, 42, 43, 44, 46, 49, 50, 51, 53, 55, 58, 71, 73, 75,
];

const HALF_FORTUNE_NUMBERS: &[u32] = &[26, 27, 28, 36, 56, 59, 69, 70, 72, 78];

/// Branch pairs the tradition singles out as favourable: the Zi-Chou
/// six-harmony plus the adjacent affinity pairs.
const HARMONIOUS_BRANCHES: &[(EarthlyBranch, EarthlyBranch)] = &[
    (EarthlyBranch::Zi, EarthlyBranch::Chou),
    (EarthlyBranch::Yin, EarthlyBranch::Mao),
    (EarthlyBranch::Wu, EarthlyBranch::Wei),
    (EarthlyBranch::Shen, EarthlyBranch::You),
];

/// The four scored grid categories with their fixed weights.
pub const CATEGORY_WEIGHTS: [(GridCategory, f64); 4] = [
    (GridCategory::Human, 0.40),
    (GridCategory::Earth, 0.25),
    (GridCategory::Outer, 0.20),
    (GridCategory::Total, 0.15),
];

impl LuckTier {
    /// Tier of a grid number. Total over all inputs: anything outside the
    /// tabulated 1-81 sets, including oversized sums from long names,
    /// classifies as inauspicious.
    pub fn classify(number: u32) -> LuckTier {
        if GREAT_FORTUNE_NUMBERS.contains(&number) {
            LuckTier::GreatFortune
        } else if FORTUNE_NUMBERS.contains(&number) {
            LuckTier::Fortune
        } else if HALF_FORTUNE_NUMBERS.contains(&number) {
            LuckTier::HalfFortune
        } else {
            LuckTier::Inauspicious
        }
    }

    /// Per-side score adjustment. The inauspicious tier carries a penalty
    /// rather than a zero bonus.
    pub fn bonus(self) -> f64 {
        match self {
            LuckTier::GreatFortune => 15.0,
            LuckTier::Fortune => 10.0,
            LuckTier::HalfFortune => 5.0,
            LuckTier::Inauspicious => -10.0,
        }
    }
}

/// Element of a grid number, from its last digit.
pub fn number_element(number: u32) -> Element {
    match number % 10 {
        1 | 2 => Element::Wood,
        3 | 4 => Element::Fire,
        5 | 6 => Element::Earth,
        7 | 8 => Element::Metal,
        _ => Element::Water,
    }
}

/// Relation of two elements under the generative cycle. Symmetric:
/// either direction of generation counts.
pub fn relate_elements(a: Element, b: Element) -> ElementRelation {
    if a == b {
        ElementRelation::Same
    } else if a.generates() == b || b.generates() == a {
        ElementRelation::Generates
    } else {
        ElementRelation::Conflicts
    }
}

/// Relation of two branches: the harmony table in either order, the
/// opposite-position clash, otherwise neutral.
pub fn branch_relation(a: EarthlyBranch, b: EarthlyBranch) -> BranchRelation {
    if HARMONIOUS_BRANCHES.contains(&(a, b)) || HARMONIOUS_BRANCHES.contains(&(b, a)) {
        BranchRelation::Harmony
    } else if a.opposite() == b {
        BranchRelation::Conflict
    } else {
        BranchRelation::Neutral
    }
}

/// Every clashing branch pair among the four pillars, in pillar order.
pub fn branch_conflicts(pillars: &FourPillars) -> Vec<(EarthlyBranch, EarthlyBranch)> {
    let branches = pillars.branches();
    let mut conflicts = Vec::new();
    for i in 0..branches.len() {
        for j in (i + 1)..branches.len() {
            if branch_relation(branches[i], branches[j]) == BranchRelation::Conflict {
                conflicts.push((branches[i], branches[j]));
            }
        }
    }
    conflicts
}

/// Scores one grid category between two people. Base 50, element relation
/// +30 / +20 / -30, per-side luck bonus, clamped into [0, 100].
pub fn score_grid(value_a: u32, value_b: u32, category: GridCategory) -> GridScore {
    let element_a = number_element(value_a);
    let element_b = number_element(value_b);
    let relation = relate_elements(element_a, element_b);
    let luck_a = LuckTier::classify(value_a);
    let luck_b = LuckTier::classify(value_b);

    let mut score = 50.0;
    score += match relation {
        ElementRelation::Generates => 30.0,
        ElementRelation::Same => 20.0,
        ElementRelation::Conflicts => -30.0,
    };
    score += luck_a.bonus() + luck_b.bonus();

    let weight = CATEGORY_WEIGHTS
        .iter()
        .find(|&&(c, _)| c == category)
        .map(|&(_, w)| w)
        .unwrap_or(0.0);

    GridScore {
        category,
        score: score.clamp(0.0, 100.0),
        weight,
        rationale: GridRationale {
            value_a,
            value_b,
            element_a,
            element_b,
            relation,
            luck_a,
            luck_b,
        },
    }
}

/// Weighted overall score over the four scored categories.
pub fn overall_score(categories: &[GridScore]) -> f64 {
    categories.iter().map(|c| c.score * c.weight).sum()
}

/// Full pairwise comparison of two name grids.
pub fn score_match(a: &NameGrid, b: &NameGrid) -> MatchScore {
    let categories = CATEGORY_WEIGHTS
        .map(|(category, _)| score_grid(a.value(category), b.value(category), category));
    let overall = overall_score(&categories);
    log::debug!("grid match scored {:.1}", overall);
    MatchScore {
        categories,
        overall,
    }
}

/// Standing of the marriage palace, read from the day branch.
pub fn marriage_palace(day_branch: EarthlyBranch) -> MarriagePalace {
    match day_branch {
        EarthlyBranch::Chou
        | EarthlyBranch::Wu
        | EarthlyBranch::Wei
        | EarthlyBranch::Shen
        | EarthlyBranch::Mao => MarriagePalace::Auspicious,
        EarthlyBranch::Yin | EarthlyBranch::You | EarthlyBranch::Chen | EarthlyBranch::Hai => {
            MarriagePalace::Fair
        }
        EarthlyBranch::Zi | EarthlyBranch::Si | EarthlyBranch::Xu => MarriagePalace::Adverse,
    }
}

/// Affinity percentage between two blood types, from the fixed matrix.
pub fn blood_affinity(a: BloodType, b: BloodType) -> u32 {
    match (a, b) {
        (BloodType::A, BloodType::A) => 100,
        (BloodType::A, BloodType::B) | (BloodType::B, BloodType::A) => 60,
        (BloodType::A, BloodType::Ab) | (BloodType::Ab, BloodType::A) => 90,
        (BloodType::A, BloodType::O) | (BloodType::O, BloodType::A) => 70,
        (BloodType::B, BloodType::B) => 100,
        (BloodType::B, BloodType::Ab) | (BloodType::Ab, BloodType::B) => 80,
        (BloodType::B, BloodType::O) | (BloodType::O, BloodType::B) => 90,
        (BloodType::Ab, BloodType::Ab) => 100,
        (BloodType::Ab, BloodType::O) | (BloodType::O, BloodType::Ab) => 70,
        (BloodType::O, BloodType::O) => 100,
    }
}

/// Traits attributed to a blood type.
pub fn blood_traits(blood: BloodType) -> &'static [&'static str] {
    match blood {
        BloodType::A => &["careful", "earnest", "perfectionist", "reserved", "reliable"],
        BloodType::B => &["lively", "optimistic", "flexible", "adventurous", "sociable"],
        BloodType::Ab => &["rational", "clever", "dual-natured", "distinctive", "calm"],
        BloodType::O => &["spirited", "frank", "commanding", "cheerful", "bold"],
    }
}

/// Traditional reading attached to some grid numbers. Sparse on purpose:
/// only the numbers the source annotates carry prose.
pub fn number_meaning(number: u32) -> Option<&'static str> {
    let meaning = match number {
        1 => "the primal number: boundless growth, standing at the head",
        3 => "heaven, earth and man in accord: great undertakings prosper",
        5 => "the five phases in balance: fortune flows from every side",
        6 => "heaven's bounty settles: peace and a harmonious house",
        7 => "stern independence: innate force carries the day",
        8 => "perseverance through hardship: diligence slowly rewarded",
        11 => "dry shoots meet spring rain: the family fortune revives",
        12 => "frail reeds without support: ambitions outrun strength",
        13 => "gifted and well-regarded: wit turned to great account",
        15 => "fortune and long life together: esteem ripens with age",
        16 => "trusted by the many: a chief who gathers followers",
        17 => "power pushed through obstacles: victory if temper holds",
        18 => "authority and accomplishment: success after steady effort",
        21 => "the moon alone in mid-sky: eminence reached step by step",
        22 => "autumn grass under frost: talent meets a thin season",
        23 => "the rising sun: a commanding ascent from modest ground",
        24 => "a purse filled grain by grain: wealth built from nothing",
        25 => "keen ability with a sharp edge: success if words stay soft",
        _ => return None,
    };
    Some(meaning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_luck_classification() {
        assert_eq!(LuckTier::classify(1), LuckTier::GreatFortune);
        assert_eq!(LuckTier::classify(81), LuckTier::GreatFortune);
        assert_eq!(LuckTier::classify(14), LuckTier::Fortune);
        assert_eq!(LuckTier::classify(26), LuckTier::HalfFortune);
        assert_eq!(LuckTier::classify(2), LuckTier::Inauspicious);
        assert_eq!(LuckTier::classify(80), LuckTier::Inauspicious);
        // Oversized totals from long names stay classifiable.
        assert_eq!(LuckTier::classify(130), LuckTier::Inauspicious);
    }

    #[test]
    fn test_number_element_digits() {
        assert_eq!(number_element(11), Element::Wood);
        assert_eq!(number_element(23), Element::Fire);
        assert_eq!(number_element(16), Element::Earth);
        assert_eq!(number_element(37), Element::Metal);
        assert_eq!(number_element(20), Element::Water);
        assert_eq!(number_element(9), Element::Water);
    }

    #[test]
    fn test_relate_elements_reflexive_and_symmetric() {
        for a in Element::all() {
            assert_eq!(relate_elements(a, a), ElementRelation::Same);
            for b in Element::all() {
                assert_eq!(relate_elements(a, b), relate_elements(b, a));
            }
        }
        assert_eq!(
            relate_elements(Element::Wood, Element::Fire),
            ElementRelation::Generates
        );
        assert_eq!(
            relate_elements(Element::Water, Element::Wood),
            ElementRelation::Generates
        );
        assert_eq!(
            relate_elements(Element::Wood, Element::Earth),
            ElementRelation::Conflicts
        );
    }

    #[test]
    fn test_branch_relation_symmetry() {
        for a in EarthlyBranch::all() {
            for b in EarthlyBranch::all() {
                assert_eq!(branch_relation(a, b), branch_relation(b, a));
            }
        }
        assert_eq!(
            branch_relation(EarthlyBranch::Zi, EarthlyBranch::Chou),
            BranchRelation::Harmony
        );
        assert_eq!(
            branch_relation(EarthlyBranch::Zi, EarthlyBranch::Wu),
            BranchRelation::Conflict
        );
        assert_eq!(
            branch_relation(EarthlyBranch::Zi, EarthlyBranch::Yin),
            BranchRelation::Neutral
        );
    }

    #[test]
    fn test_branch_conflict_scan() {
        let moment = crate::BirthMoment::new(1990, 5, 15, 14).unwrap();
        let pillars = moment.four_pillars();
        for (a, b) in branch_conflicts(&pillars) {
            assert_eq!(a.opposite(), b);
        }
    }

    #[test]
    fn test_score_is_always_clamped() {
        for a in 1..=120 {
            for b in 1..=120 {
                let score = score_grid(a, b, GridCategory::Human).score;
                assert!((0.0..=100.0).contains(&score), "{} vs {} -> {}", a, b, score);
            }
        }
    }

    #[test]
    fn test_same_element_great_fortune_hits_ceiling() {
        // 11 and 21 are both great fortune and both wood:
        // 50 + 20 + 15 + 15 = 100.
        let score = score_grid(11, 21, GridCategory::Human);
        assert_relative_eq!(score.score, 100.0);
        assert_eq!(score.rationale.relation, ElementRelation::Same);
    }

    #[test]
    fn test_conflicting_inauspicious_hits_floor() {
        // 12 (wood, inauspicious) vs 66 (earth, inauspicious):
        // 50 - 30 - 10 - 10 = 0.
        let score = score_grid(12, 66, GridCategory::Total);
        assert_relative_eq!(score.score, 0.0);
        assert_eq!(score.rationale.relation, ElementRelation::Conflicts);
        assert_eq!(score.rationale.luck_a, LuckTier::Inauspicious);
    }

    #[test]
    fn test_overall_weighting() {
        let grid = NameGrid {
            heaven: 11,
            human: 11,
            earth: 21,
            outer: 31,
            total: 41,
        };
        // Identical great-fortune wood grids: every category scores 100,
        // so the weighted overall is exactly 100.
        let result = score_match(&grid, &grid);
        assert_relative_eq!(result.overall, 100.0);
        let weight_sum: f64 = result.categories.iter().map(|c| c.weight).sum();
        assert_relative_eq!(weight_sum, 1.0);
    }

    #[test]
    fn test_overall_floor() {
        // All four categories at the floor stay at the floor overall.
        let grid_a = NameGrid {
            heaven: 12,
            human: 12,
            earth: 12,
            outer: 12,
            total: 12,
        };
        let grid_b = NameGrid {
            heaven: 66,
            human: 66,
            earth: 66,
            outer: 66,
            total: 66,
        };
        let result = score_match(&grid_a, &grid_b);
        assert_relative_eq!(result.overall, 0.0);
    }

    #[test]
    fn test_blood_affinity_symmetric() {
        for a in BloodType::all() {
            assert_eq!(blood_affinity(a, a), 100);
            for b in BloodType::all() {
                assert_eq!(blood_affinity(a, b), blood_affinity(b, a));
            }
        }
        assert_eq!(blood_affinity(BloodType::A, BloodType::B), 60);
        assert_eq!(blood_affinity(BloodType::O, BloodType::B), 90);
    }

    #[test]
    fn test_marriage_palace_partition() {
        let mut counts = [0u32; 3];
        for branch in EarthlyBranch::all() {
            match marriage_palace(branch) {
                MarriagePalace::Auspicious => counts[0] += 1,
                MarriagePalace::Fair => counts[1] += 1,
                MarriagePalace::Adverse => counts[2] += 1,
            }
        }
        assert_eq!(counts, [5, 4, 3]);
    }

    #[test]
    fn test_number_meanings_sparse() {
        assert!(number_meaning(1).is_some());
        assert!(number_meaning(15).is_some());
        assert!(number_meaning(2).is_none());
        assert!(number_meaning(80).is_none());
    }
}
