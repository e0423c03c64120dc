//! Route exposure records and alternative derivation
//!
//! Three alternatives are derived per base route from fixed profiles.
//! All intermediate arithmetic truncates toward zero; the only rounding
//! is the one-decimal display rounding of the stored distance.

use serde::{Deserialize, Serialize};

/// A commute route with its measured pollutant exposure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseRoute {
    pub id: String,
    pub name: String,
    pub start: String,
    pub end: String,
    pub distance_km: f64,
    pub avg_pm25: i64,
    pub avg_pm10: f64,
    pub exposure_time_mins: i64,
    pub peak_hours_factor: f64,
    pub total_exposure: i64,
}

/// A derived alternative for a base route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteAlternative {
    pub id: String,
    pub name: String,
    pub distance_km: f64,
    pub avg_pm25: i64,
    pub avg_pm10: i64,
    pub exposure_time_mins: i64,
    pub reduction_percent: i64,
    pub extra_time_mins: i64,
    pub total_exposure: i64,
    pub exposure_reduction: i64,
}

/// A base route together with its alternatives, sorted by benefit
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub base_route: BaseRoute,
    pub alternatives: Vec<RouteAlternative>,
}

impl RoutePlan {
    pub fn derive(base_route: BaseRoute) -> Self {
        let alternatives = derive_alternatives(&base_route);
        Self { base_route, alternatives }
    }
}

struct AlternativeProfile {
    label: &'static str,
    distance_factor: f64,
    pm_factor: f64,
    minutes_per_km: f64,
    reduction_percent: i64,
}

/// Fixed derivation profiles: less polluted / off-peak / alternate mode
const PROFILES: [AlternativeProfile; 3] = [
    AlternativeProfile {
        label: "Less polluted route",
        distance_factor: 1.15,
        pm_factor: 0.65,
        minutes_per_km: 6.0,
        reduction_percent: 35,
    },
    AlternativeProfile {
        label: "Travel during off-peak hours",
        distance_factor: 1.0,
        pm_factor: 0.75,
        minutes_per_km: 6.0,
        reduction_percent: 25,
    },
    AlternativeProfile {
        label: "Use different transport mode",
        distance_factor: 1.0,
        pm_factor: 0.5,
        minutes_per_km: 7.0,
        reduction_percent: 50,
    },
];

/// Truncation toward zero, int() semantics
fn trunc(value: f64) -> i64 {
    value.trunc() as i64
}

/// Round to one decimal for the stored distance field
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Derive the three fixed alternatives for a base route.
///
/// Deterministic: pure arithmetic on the base route fields. The result
/// is sorted descending by `exposure_reduction`; ties keep computation
/// order (alt1, alt2, alt3).
pub fn derive_alternatives(route: &BaseRoute) -> Vec<RouteAlternative> {
    let baseline_time_mins = trunc(route.distance_km * 6.0);

    let mut alternatives: Vec<RouteAlternative> = PROFILES
        .iter()
        .enumerate()
        .map(|(i, profile)| {
            let avg_pm25 = trunc(route.avg_pm25 as f64 * profile.pm_factor);
            let avg_pm10 = trunc(avg_pm25 as f64 * 1.6);
            let exposure_time_mins =
                trunc(route.distance_km * profile.distance_factor * profile.minutes_per_km);
            let total_exposure = trunc(avg_pm25 as f64 * exposure_time_mins as f64 / 10.0);

            RouteAlternative {
                id: format!("{}_alt{}", route.id, i + 1),
                name: format!("Alternative {}: {}", i + 1, profile.label),
                distance_km: round1(route.distance_km * profile.distance_factor),
                avg_pm25,
                avg_pm10,
                exposure_time_mins,
                reduction_percent: profile.reduction_percent,
                extra_time_mins: exposure_time_mins - baseline_time_mins,
                total_exposure,
                exposure_reduction: route.total_exposure - total_exposure,
            }
        })
        .collect();

    // sort_by is stable, so equal reductions keep computation order
    alternatives.sort_by(|a, b| b.exposure_reduction.cmp(&a.exposure_reduction));
    alternatives
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home_to_office() -> BaseRoute {
        BaseRoute {
            id: "route1".to_string(),
            name: "Home to Office".to_string(),
            start: "Thamel".to_string(),
            end: "New Baneshwor".to_string(),
            distance_km: 6.5,
            avg_pm25: 85,
            avg_pm10: 136.0,
            exposure_time_mins: 39,
            peak_hours_factor: 1.5,
            total_exposure: 331,
        }
    }

    fn office_to_gym() -> BaseRoute {
        BaseRoute {
            id: "route2".to_string(),
            name: "Office to Gym".to_string(),
            start: "New Baneshwor".to_string(),
            end: "Patan".to_string(),
            distance_km: 4.2,
            avg_pm25: 72,
            avg_pm10: 115.2,
            exposure_time_mins: 25,
            peak_hours_factor: 1.0,
            total_exposure: 180,
        }
    }

    #[test]
    fn test_mode_change_alternative_ranks_first() {
        let alternatives = derive_alternatives(&home_to_office());

        assert_eq!(alternatives.len(), 3);
        assert_eq!(alternatives[0].id, "route1_alt3");
        assert_eq!(alternatives[0].exposure_reduction, 142);
        assert_eq!(alternatives[1].id, "route1_alt1");
        assert_eq!(alternatives[1].exposure_reduction, 89);
        assert_eq!(alternatives[2].id, "route1_alt2");
        assert_eq!(alternatives[2].exposure_reduction, 86);
    }

    #[test]
    fn test_truncating_arithmetic() {
        let alternatives = derive_alternatives(&home_to_office());
        let alt1 = alternatives.iter().find(|a| a.id == "route1_alt1").unwrap();

        // 85 * 0.65 = 55.25 truncates to 55, never rounds
        assert_eq!(alt1.avg_pm25, 55);
        // 6.5 * 1.15 * 6 = 44.85 truncates to 44
        assert_eq!(alt1.exposure_time_mins, 44);
        // 55 * 44 / 10 = 242
        assert_eq!(alt1.total_exposure, 242);
        assert_eq!(alt1.distance_km, 7.5);
        assert_eq!(alt1.extra_time_mins, 5);
    }

    #[test]
    fn test_pm10_derived_from_truncated_pm25() {
        for route in [home_to_office(), office_to_gym()] {
            for alt in derive_alternatives(&route) {
                assert_eq!(alt.avg_pm10, trunc(alt.avg_pm25 as f64 * 1.6), "{}", alt.id);
            }
        }
    }

    #[test]
    fn test_sorted_descending_by_reduction() {
        for route in [home_to_office(), office_to_gym()] {
            let alternatives = derive_alternatives(&route);
            for pair in alternatives.windows(2) {
                assert!(pair[0].exposure_reduction >= pair[1].exposure_reduction);
            }
        }
    }

    #[test]
    fn test_off_peak_alternative_adds_no_time() {
        let alternatives = derive_alternatives(&office_to_gym());
        let alt2 = alternatives.iter().find(|a| a.id == "route2_alt2").unwrap();

        assert_eq!(alt2.extra_time_mins, 0);
        assert_eq!(alt2.distance_km, 4.2);
        assert_eq!(alt2.exposure_time_mins, 25);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let first = derive_alternatives(&office_to_gym());
        let second = derive_alternatives(&office_to_gym());

        let a = serde_json::to_string(&first).unwrap();
        let b = serde_json::to_string(&second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_route_plan_carries_base_route() {
        let plan = RoutePlan::derive(home_to_office());
        assert_eq!(plan.base_route.id, "route1");
        assert_eq!(plan.alternatives.len(), 3);
    }
}
