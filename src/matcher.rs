use crate::config::MatchPoints;
use crate::data::{
    Budget, DuvetType, Insulation, Preferences, Product, Quality, Recommendation, Season,
    SleepTemperature, Size, Variant,
};

/// Season implied by a duvet type. Plain and unmapped types count as all-season.
pub fn season_of(duvet_type: DuvetType) -> Season {
    match duvet_type {
        DuvetType::Sommerdyne => Season::Summer,
        DuvetType::Vinterdyne => Season::Winter,
        DuvetType::FourSeasons => Season::AllSeason,
        DuvetType::Dyne | DuvetType::Unknown => Season::AllSeason,
    }
}

/// Warmth on a 1-5 scale. Unmapped insulation counts as medium.
pub fn warmth_score(insulation: Insulation) -> u8 {
    match insulation {
        Insulation::Sval => 1,
        Insulation::Normal => 3,
        Insulation::Varm => 4,
        Insulation::EkstraVarm => 5,
        Insulation::Unknown => 3,
    }
}

fn temperature_fits(wanted: SleepTemperature, warmth: u8) -> bool {
    match wanted {
        SleepTemperature::Cold => warmth >= 4,
        SleepTemperature::Warm => warmth <= 2,
        SleepTemperature::Normal => warmth == 3,
    }
}

fn budget_fits(wanted: Budget, price: u32, points: &MatchPoints) -> bool {
    match wanted {
        Budget::Low => price <= points.low_budget_max,
        Budget::Medium => price > points.low_budget_max && price <= points.medium_budget_max,
        Budget::High => price > points.medium_budget_max,
    }
}

fn size_fits(wanted: Size, width: u32, points: &MatchPoints) -> bool {
    match wanted {
        Size::Single => width == points.single_width,
        Size::Double => width >= points.double_min_width,
    }
}

fn variant_score(variant: &Variant, prefs: &Preferences, points: &MatchPoints) -> i32 {
    let mut score = 0;

    if prefs.season == Some(season_of(variant.duvet_type)) {
        score += points.season;
    }
    if let Some(wanted) = prefs.sleep_temperature {
        if temperature_fits(wanted, warmth_score(variant.insulation)) {
            score += points.temperature;
        }
    }
    if let Some(wanted) = prefs.size {
        if size_fits(wanted, variant.width, points) {
            score += points.size;
        }
    }
    if let Some(wanted) = prefs.budget {
        if budget_fits(wanted, variant.price, points) {
            score += points.budget;
        }
    }

    score
}

/// Pick the variant of `product` that best fits `prefs`.
///
/// Only a strictly higher score replaces the current pick, so ties (and an
/// empty preference record) keep the earliest variant in catalog order.
///
/// # Panics
///
/// Panics if `product` has no variants. Catalog loading rejects such products.
pub fn select_variant<'a>(product: &'a Product, prefs: &Preferences) -> &'a Variant {
    select_variant_with(product, prefs, &MatchPoints::default())
}

pub fn select_variant_with<'a>(
    product: &'a Product,
    prefs: &Preferences,
    points: &MatchPoints,
) -> &'a Variant {
    let mut best = &product.variants[0];
    let mut best_score = 0;

    for variant in &product.variants {
        let score = variant_score(variant, prefs, points);
        if score > best_score {
            best_score = score;
            best = variant;
        }
    }

    best
}

fn season_name(season: Season) -> &'static str {
    match season {
        Season::Summer => "sommer",
        Season::Winter => "vinter",
        Season::AllSeason => "alle årstider",
    }
}

fn score_product<'a>(
    product: &'a Product,
    prefs: &Preferences,
    points: &MatchPoints,
) -> Recommendation<'a> {
    let variant = select_variant_with(product, prefs, points);
    let mut score = 0;
    let mut reasons = Vec::new();

    if let Some(wanted) = prefs.season {
        if season_of(variant.duvet_type) == wanted {
            score += points.season;
            reasons.push(format!("Perfekt til {}", season_name(wanted)));
        }
    }

    if let Some(wanted) = prefs.sleep_temperature {
        if temperature_fits(wanted, warmth_score(variant.insulation)) {
            score += points.temperature;
            reasons.push(
                match wanted {
                    SleepTemperature::Cold => "Ekstra varm til dem der fryser let",
                    SleepTemperature::Warm => "Let og kølig til varme sovere",
                    SleepTemperature::Normal => "Medium varme, perfekt til de fleste",
                }
                .to_string(),
            );
        }
    }

    // Only positives are explained: the penalty adds no reason.
    if prefs.allergies == Some(true) {
        if product.allergy_friendly {
            score += points.allergy_bonus;
            reasons.push("Allergivenlig og egnet til allergiramte".to_string());
        } else {
            score -= points.allergy_penalty;
        }
    }

    if let Some(wanted) = prefs.budget {
        if budget_fits(wanted, variant.price, points) {
            score += points.budget;
            reasons.push(
                match wanted {
                    Budget::Low => "Inden for dit budget",
                    Budget::Medium => "God balance mellem kvalitet og pris",
                    Budget::High => "Premium kvalitet med de fineste materialer",
                }
                .to_string(),
            );
        }
    }

    match product.quality {
        Quality::Gold => {
            score += points.gold_bonus;
            reasons.push("Høj kvalitet (GOLD)".to_string());
        }
        Quality::Platinum => {
            score += points.platinum_bonus;
            reasons.push("Højeste kvalitet (PLATINUM)".to_string());
        }
        Quality::Silver => {}
    }

    if product.rating >= points.rating_threshold {
        score += points.rating_bonus;
        reasons.push(format!("Høj kundebedømmelse ({}/5)", product.rating));
    }

    tracing::debug!(
        product = %product.id,
        variant = %variant.id,
        score,
        reasons = reasons.len(),
        "Scored product"
    );

    Recommendation {
        product,
        variant,
        score,
        reasons,
    }
}

/// Score every product in `catalog` and rank by descending score.
///
/// Equal scores keep their catalog order. Nothing is dropped; truncation is
/// left to the caller (see [`top_matches`]).
pub fn match_duvets<'a>(catalog: &'a [Product], prefs: &Preferences) -> Vec<Recommendation<'a>> {
    match_duvets_with(catalog, prefs, &MatchPoints::default())
}

pub fn match_duvets_with<'a>(
    catalog: &'a [Product],
    prefs: &Preferences,
    points: &MatchPoints,
) -> Vec<Recommendation<'a>> {
    let mut scored: Vec<Recommendation<'a>> = catalog
        .iter()
        .map(|product| score_product(product, prefs, points))
        .collect();

    // `sort_by` is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    tracing::info!(
        products = scored.len(),
        best_score = ?scored.first().map(|r| r.score),
        "Ranked catalog"
    );

    scored
}

pub fn top_matches<'a>(
    catalog: &'a [Product],
    prefs: &Preferences,
    points: &MatchPoints,
    n: usize,
) -> Vec<Recommendation<'a>> {
    let mut ranked = match_duvets_with(catalog, prefs, points);
    ranked.truncate(n);
    ranked
}

/// One-sentence Danish summary of who the recommendations suit.
pub fn recommendation_summary(prefs: &Preferences) -> String {
    let mut parts = Vec::new();

    if let Some(temperature) = prefs.sleep_temperature {
        parts.push(
            match temperature {
                SleepTemperature::Cold => "varme soveværelser",
                SleepTemperature::Warm => "kølige soveværelser",
                SleepTemperature::Normal => "standard soveværelser",
            }
            .to_string(),
        );
    }

    if let Some(season) = prefs.season {
        let name = match season {
            Season::Summer => "sommer",
            Season::Winter => "vinter",
            Season::AllSeason => "hele året",
        };
        parts.push(format!("{} brug", name));
    }

    if prefs.allergies == Some(true) {
        parts.push("allergiramte".to_string());
    }

    if parts.is_empty() {
        "Denne dyne matcher dine præferencer godt.".to_string()
    } else {
        format!("Denne dyne er ideel til {}.", parts.join(" og "))
    }
}
