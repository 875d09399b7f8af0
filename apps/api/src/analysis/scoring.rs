use crate::analysis::catalog::CategoryKey;

const BASE_SCORE: u32 = 35;
const CATEGORY_BONUS: u32 = 5;
const MAX_SCORED_CATEGORIES: usize = 6;
const SIGNAL_BONUS: u32 = 10;
/// JDs longer than this earn the detail bonus. Measured in UTF-16 code units, so a
/// character outside the BMP (most emoji) counts twice.
const DETAILED_JD_UNITS: usize = 800;

/// Signals that feed the base readiness score.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    pub categories_present: &'a [CategoryKey],
    pub company: &'a str,
    pub role: &'a str,
    pub jd_text: &'a str,
}

/// Heuristic base score: 35, plus 5 per present category (at most 6),
/// plus 10 each for a company, a role and a JD over 800 UTF-16 units. Capped at 100.
pub fn compute_readiness_score(inputs: &ScoreInputs<'_>) -> u32 {
    let mut score = BASE_SCORE;

    score += CATEGORY_BONUS * inputs.categories_present.len().min(MAX_SCORED_CATEGORIES) as u32;

    if !inputs.company.trim().is_empty() {
        score += SIGNAL_BONUS;
    }
    if !inputs.role.trim().is_empty() {
        score += SIGNAL_BONUS;
    }
    if inputs.jd_text.encode_utf16().count() > DETAILED_JD_UNITS {
        score += SIGNAL_BONUS;
    }

    score.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs<'a>(
        categories_present: &'a [CategoryKey],
        company: &'a str,
        role: &'a str,
        jd_text: &'a str,
    ) -> ScoreInputs<'a> {
        ScoreInputs {
            categories_present,
            company,
            role,
            jd_text,
        }
    }

    #[test]
    fn test_empty_inputs_score_base() {
        assert_eq!(compute_readiness_score(&inputs(&[], "", "", "")), 35);
    }

    #[test]
    fn test_three_categories_no_signals_is_50() {
        let present = [CategoryKey::CoreCs, CategoryKey::Web, CategoryKey::Data];
        assert_eq!(
            compute_readiness_score(&inputs(&present, "", "", "short jd")),
            50
        );
    }

    #[test]
    fn test_all_signals_reach_exactly_100() {
        let long_jd = "x".repeat(801);
        assert_eq!(
            compute_readiness_score(&inputs(&CategoryKey::ALL, "Acme", "SDE-1", &long_jd)),
            100
        );
    }

    #[test]
    fn test_whitespace_company_and_role_do_not_count() {
        assert_eq!(compute_readiness_score(&inputs(&[], "   ", "\t\n", "")), 35);
        assert_eq!(compute_readiness_score(&inputs(&[], " Acme ", "", "")), 45);
    }

    #[test]
    fn test_length_threshold_is_strictly_greater_than_800() {
        let at = "x".repeat(800);
        let over = "x".repeat(801);
        assert_eq!(compute_readiness_score(&inputs(&[], "", "", &at)), 35);
        assert_eq!(compute_readiness_score(&inputs(&[], "", "", &over)), 45);
    }

    #[test]
    fn test_length_counts_utf16_units() {
        // 401 emoji are 802 UTF-16 units.
        let emoji = "\u{1F680}".repeat(401);
        assert_eq!(compute_readiness_score(&inputs(&[], "", "", &emoji)), 45);
        // BMP characters count once each.
        let accented = "\u{00E9}".repeat(800);
        assert_eq!(compute_readiness_score(&inputs(&[], "", "", &accented)), 35);
    }

    #[test]
    fn test_category_bonus_is_capped_at_six() {
        let many = [CategoryKey::Web; 9];
        assert_eq!(compute_readiness_score(&inputs(&many, "", "", "")), 65);
    }

    #[test]
    fn test_score_monotone_in_categories_and_bounded() {
        let long_jd = "y".repeat(1000);
        for (company, role, jd) in [("", "", ""), ("Acme", "SDE", long_jd.as_str())] {
            let mut previous = 0;
            for n in 0..=CategoryKey::ALL.len() {
                let score =
                    compute_readiness_score(&inputs(&CategoryKey::ALL[..n], company, role, jd));
                assert!(score >= previous, "score dropped at n={n}");
                assert!((35..=100).contains(&score));
                previous = score;
            }
        }
    }
}
