//! Role reference baselines and the "you vs team" verdict.

use crate::models::{
    BaselineComparison, BaselineMetric, BaselineStatus, ResponsibilityVerdict, Role, SummaryStats,
    Verdict,
};

use super::safe_ratio;

/// Ratio to baseline at or above which a metric counts as above it.
pub const ABOVE_RATIO: f64 = 1.10;

/// Ratio to baseline at or above which a metric counts as near it.
pub const NEAR_RATIO: f64 = 0.90;

/// Losses index at or above which losses look team-driven.
pub const TEAM_DRIVEN_INDEX: f64 = 0.5;

/// Number of below-baseline metrics that triggers the caveat.
pub const CAVEAT_BELOW_COUNT: usize = 3;

/// High-elo reference values for one role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleBaseline {
    pub cs_per_min: f64,
    pub damage_share: f64,
    pub kda: f64,
    pub kp: f64,
}

impl RoleBaseline {
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Top => RoleBaseline {
                cs_per_min: 7.5,
                damage_share: 0.23,
                kda: 3.0,
                kp: 0.55,
            },
            Role::Jungle => RoleBaseline {
                cs_per_min: 6.5,
                damage_share: 0.20,
                kda: 3.0,
                kp: 0.70,
            },
            Role::Middle => RoleBaseline {
                cs_per_min: 7.5,
                damage_share: 0.25,
                kda: 3.0,
                kp: 0.65,
            },
            Role::Bottom => RoleBaseline {
                cs_per_min: 8.0,
                damage_share: 0.27,
                kda: 3.0,
                kp: 0.65,
            },
            Role::Utility => RoleBaseline {
                cs_per_min: 1.5,
                damage_share: 0.15,
                kda: 3.0,
                kp: 0.70,
            },
        }
    }
}

fn compare(value: f64, baseline: f64) -> BaselineMetric {
    let status = if baseline <= 0.0 {
        BaselineStatus::NoBaseline
    } else {
        let ratio = safe_ratio(value, baseline);
        if ratio >= ABOVE_RATIO {
            BaselineStatus::Above
        } else if ratio >= NEAR_RATIO {
            BaselineStatus::Near
        } else {
            BaselineStatus::Below
        }
    };

    BaselineMetric {
        your_value: value,
        baseline,
        status,
    }
}

/// Compare aggregate averages against the primary role's baseline.
pub fn compare_to_baseline(summary: &SummaryStats, role: Role) -> BaselineComparison {
    let baseline = RoleBaseline::for_role(role);
    BaselineComparison {
        role,
        avg_cs_per_min: compare(summary.avg_cs_per_min, baseline.cs_per_min),
        avg_damage_share: compare(summary.avg_damage_share, baseline.damage_share),
        avg_kda: compare(summary.avg_kda, baseline.kda),
        avg_kp: compare(summary.avg_kp, baseline.kp),
    }
}

/// Build the verdict from the two responsibility indices.
pub fn responsibility_verdict(
    overall_index: f64,
    losses_index: f64,
    comparison: &BaselineComparison,
) -> ResponsibilityVerdict {
    let verdict = if losses_index >= TEAM_DRIVEN_INDEX {
        Verdict::TeamDriven
    } else if losses_index <= -TEAM_DRIVEN_INDEX {
        Verdict::PlayerDriven
    } else {
        Verdict::Mixed
    };

    let mut classification = match verdict {
        Verdict::TeamDriven => "In your losses you are often one of the better performers on \
            your team, so many games look lost to team macro, coordination or scaling rather \
            than your own lane play."
            .to_string(),
        Verdict::PlayerDriven => "In your losses you are frequently near the bottom of your \
            team, which points to your own deaths, damage output or CS as a primary factor."
            .to_string(),
        Verdict::Mixed => "In your losses responsibility looks mixed: sometimes you perform \
            well and still lose, other times your own numbers lag behind."
            .to_string(),
    };

    let below_baseline_caveat = comparison.below_count() >= CAVEAT_BELOW_COUNT;
    if below_baseline_caveat {
        classification.push_str(&format!(
            " Several core metrics sit below typical high-elo baselines for {}, so there is \
             room for personal improvement even when the team struggles.",
            comparison.role.label_plural()
        ));
    }

    ResponsibilityVerdict {
        overall_index,
        losses_index,
        verdict,
        below_baseline_caveat,
        classification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(cs: f64, dmg: f64, kda: f64, kp: f64) -> SummaryStats {
        SummaryStats {
            avg_cs_per_min: cs,
            avg_damage_share: dmg,
            avg_kda: kda,
            avg_kp: kp,
            ..Default::default()
        }
    }

    #[test]
    fn test_status_bands() {
        let cmp = compare_to_baseline(&summary(8.5, 0.23, 2.0, 0.65), Role::Middle);
        assert_eq!(cmp.avg_cs_per_min.status, BaselineStatus::Above);
        assert_eq!(cmp.avg_damage_share.status, BaselineStatus::Near);
        assert_eq!(cmp.avg_kda.status, BaselineStatus::Below);
        assert_eq!(cmp.avg_kp.status, BaselineStatus::Near);
        assert_eq!(cmp.avg_kp.baseline, 0.65);
    }

    #[test]
    fn test_role_baselines_differ() {
        assert_eq!(RoleBaseline::for_role(Role::Utility).cs_per_min, 1.5);
        assert_eq!(RoleBaseline::for_role(Role::Bottom).damage_share, 0.27);
        assert_eq!(RoleBaseline::for_role(Role::Jungle).kp, 0.70);
    }

    #[test]
    fn test_verdict_thresholds() {
        let cmp = compare_to_baseline(&summary(8.0, 0.25, 3.0, 0.65), Role::Middle);

        assert_eq!(responsibility_verdict(0.0, 0.5, &cmp).verdict, Verdict::TeamDriven);
        assert_eq!(responsibility_verdict(0.0, -0.5, &cmp).verdict, Verdict::PlayerDriven);
        assert_eq!(responsibility_verdict(0.0, 0.49, &cmp).verdict, Verdict::Mixed);
    }

    #[test]
    fn test_caveat_when_three_metrics_below() {
        let cmp = compare_to_baseline(&summary(3.0, 0.10, 1.0, 0.65), Role::Bottom);
        assert_eq!(cmp.below_count(), 3);

        let verdict = responsibility_verdict(1.0, 1.0, &cmp);
        assert!(verdict.below_baseline_caveat);
        assert!(verdict.classification.contains("bot laners"));
    }
}
