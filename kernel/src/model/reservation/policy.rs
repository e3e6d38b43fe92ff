use super::BookedInterval;
use crate::model::role::Role;
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use shared::config::PolicyConfig;
use shared::error::{AppError, AppResult};

/// What the policy gets to look at besides the requested interval.
#[derive(Debug, Clone, Copy)]
pub struct AdmissionContext<'a> {
    pub role: Role,
    /// False when an admin books on behalf of somebody else.
    pub self_service: bool,
    pub now: DateTime<Utc>,
    /// The requesting user's committed active intervals.
    pub user_booked: &'a [BookedInterval],
}

/// Business-rule hook evaluated after the structural admission rules.
/// Swappable so deployments can relax or replace the standard limits.
pub trait ReservationPolicy: Send + Sync {
    fn check(
        &self,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        ctx: &AdmissionContext<'_>,
    ) -> AppResult<()>;
}

/// The intranet's booking limits: 15–60 minute reservations, at most
/// three months ahead, and one reservation per working week for
/// students booking for themselves.
#[derive(Debug, Clone)]
pub struct StandardPolicy {
    min_duration: Duration,
    max_duration: Duration,
    max_advance: Duration,
    weekly_limit: usize,
}

impl StandardPolicy {
    pub fn new(cfg: &PolicyConfig) -> Self {
        Self {
            min_duration: Duration::minutes(cfg.min_duration_minutes),
            max_duration: Duration::minutes(cfg.max_duration_minutes),
            max_advance: Duration::days(cfg.max_advance_days),
            weekly_limit: cfg.weekly_limit,
        }
    }
}

impl ReservationPolicy for StandardPolicy {
    fn check(
        &self,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        ctx: &AdmissionContext<'_>,
    ) -> AppResult<()> {
        let duration = end_at - start_at;
        if duration < self.min_duration {
            return Err(AppError::PolicyViolation(format!(
                "the reservation is too short, the minimum is {} minutes",
                self.min_duration.num_minutes()
            )));
        }
        if duration > self.max_duration {
            return Err(AppError::PolicyViolation(format!(
                "the reservation is too long, the maximum is {} minutes",
                self.max_duration.num_minutes()
            )));
        }
        if start_at > ctx.now + self.max_advance {
            return Err(AppError::PolicyViolation(format!(
                "reservations may be made at most {} days in advance",
                self.max_advance.num_days()
            )));
        }

        let weekly_limited = match ctx.role {
            Role::Admin => false,
            Role::Student => ctx.self_service,
        };
        if weekly_limited {
            let (week_start, week_end) = working_week_of(start_at);
            let taken = ctx
                .user_booked
                .iter()
                .filter(|b| b.start_at >= week_start && b.start_at < week_end)
                .count();
            if taken >= self.weekly_limit {
                return Err(AppError::PolicyViolation(format!(
                    "weekly limit reached: at most {} reservation(s) per working week",
                    self.weekly_limit
                )));
            }
        }

        Ok(())
    }
}

/// A policy that admits everything; the rule-5 hook left open.
#[derive(Debug, Clone, Default)]
pub struct PermissivePolicy;

impl ReservationPolicy for PermissivePolicy {
    fn check(
        &self,
        _start_at: DateTime<Utc>,
        _end_at: DateTime<Utc>,
        _ctx: &AdmissionContext<'_>,
    ) -> AppResult<()> {
        Ok(())
    }
}

/// `[Monday 00:00, Saturday 00:00)` of the week containing `at`.
fn working_week_of(at: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let monday = at.date_naive() - Duration::days(at.weekday().num_days_from_monday().into());
    let week_start = monday.and_time(NaiveTime::MIN).and_utc();
    (week_start, week_start + Duration::days(5))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::id::{ReservationId, RoomId};
    use chrono::TimeZone;

    fn policy() -> StandardPolicy {
        StandardPolicy::new(&PolicyConfig {
            min_duration_minutes: 15,
            max_duration_minutes: 60,
            max_advance_days: 90,
            weekly_limit: 1,
        })
    }

    fn ctx<'a>(
        role: Role,
        self_service: bool,
        now: DateTime<Utc>,
        user_booked: &'a [BookedInterval],
    ) -> AdmissionContext<'a> {
        AdmissionContext {
            role,
            self_service,
            now,
            user_booked,
        }
    }

    fn booked_at(start_at: DateTime<Utc>) -> BookedInterval {
        BookedInterval {
            reservation_id: ReservationId::new(),
            room_id: RoomId::new(),
            start_at,
            end_at: start_at + Duration::hours(1),
        }
    }

    #[test]
    fn too_short_and_too_long_are_rejected() {
        let now = Utc::now();
        let start = now + Duration::hours(1);
        let p = policy();

        let err = p
            .check(start, start + Duration::minutes(10), &ctx(Role::Student, true, now, &[]))
            .unwrap_err();
        assert!(matches!(err, AppError::PolicyViolation(_)));

        let err = p
            .check(start, start + Duration::minutes(61), &ctx(Role::Student, true, now, &[]))
            .unwrap_err();
        assert!(matches!(err, AppError::PolicyViolation(_)));

        // Exactly the maximum passes.
        p.check(start, start + Duration::minutes(60), &ctx(Role::Student, true, now, &[]))
            .unwrap();
    }

    #[test]
    fn bookings_beyond_the_horizon_are_rejected() {
        let now = Utc::now();
        let start = now + Duration::days(91);
        let err = policy()
            .check(start, start + Duration::minutes(30), &ctx(Role::Student, true, now, &[]))
            .unwrap_err();
        assert!(matches!(err, AppError::PolicyViolation(_)));
    }

    #[test]
    fn second_booking_in_the_same_working_week_is_rejected() {
        // A fixed Monday keeps the whole scenario inside one week.
        let monday = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let now = monday - Duration::days(3);
        let existing = [booked_at(monday)];

        let wednesday = monday + Duration::days(2);
        let err = policy()
            .check(
                wednesday,
                wednesday + Duration::minutes(30),
                &ctx(Role::Student, true, now, &existing),
            )
            .unwrap_err();
        assert!(matches!(err, AppError::PolicyViolation(_)));
    }

    #[test]
    fn next_week_is_a_fresh_allowance() {
        let monday = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let now = monday - Duration::days(3);
        let existing = [booked_at(monday)];

        let next_monday = monday + Duration::days(7);
        policy()
            .check(
                next_monday,
                next_monday + Duration::minutes(30),
                &ctx(Role::Student, true, now, &existing),
            )
            .unwrap();
    }

    #[test]
    fn admins_and_on_behalf_bookings_skip_the_weekly_limit() {
        let monday = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let now = monday - Duration::days(3);
        let existing = [booked_at(monday)];
        let wednesday = monday + Duration::days(2);
        let end = wednesday + Duration::minutes(30);

        policy()
            .check(wednesday, end, &ctx(Role::Admin, true, now, &existing))
            .unwrap();
        policy()
            .check(wednesday, end, &ctx(Role::Student, false, now, &existing))
            .unwrap();
    }
}
