//! Recommendation scoring.
//!
//! Best-effort ranking, not a guaranteed-optimal recommendation: the blend
//! favors rating, with price pulled in only when the caller gave a budget.

use crate::catalog::Product;
use crate::config::RankingConfig;

/// Composite recommendation score, higher is better.
///
/// The rating component is the rating normalized to the 5-point scale
/// (unrated products score 0 on it). With a positive budget the savings
/// component rewards prices further under it, clamped to [0, 1] so
/// over-budget products bottom out instead of going negative. Without a
/// budget the score is the rating component alone.
pub fn rank_score(product: &Product, budget: Option<f64>, config: &RankingConfig) -> f64 {
    let rating_component = product.rating.unwrap_or(0.0) / 5.0;

    match budget {
        Some(budget) if budget > 0.0 => {
            let savings = (1.0 - product.price / budget).clamp(0.0, 1.0);
            config.rating_weight * rating_component + config.price_weight * savings
        }
        _ => rating_component,
    }
}
