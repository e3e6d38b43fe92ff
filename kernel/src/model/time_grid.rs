use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use shared::error::{AppError, AppResult};

/// One fixed block of the daily grid. Ids follow the `"HH:MM-HH:MM"`
/// convention so clients can sort cells lexicographically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: String,
    pub label: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// A slot projected onto a concrete date as an absolute half-open
/// `[start_at, end_at)` window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotWindow {
    pub slot_id: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

/// Validated catalog of the day's slots: non-empty, each slot with
/// `start < end`, ordered by start, pairwise non-overlapping.
#[derive(Debug, Clone)]
pub struct TimeGrid {
    slots: Vec<TimeSlot>,
}

impl TimeGrid {
    pub fn new(slots: Vec<TimeSlot>) -> AppResult<Self> {
        if slots.is_empty() {
            return Err(AppError::ConfigError("the slot grid is empty".into()));
        }
        for slot in &slots {
            if slot.start >= slot.end {
                return Err(AppError::ConfigError(format!(
                    "slot {} does not satisfy start < end",
                    slot.id
                )));
            }
        }

        let mut slots = slots;
        slots.sort_by_key(|s| s.start);
        for pair in slots.windows(2) {
            if pair[1].start < pair[0].end {
                return Err(AppError::ConfigError(format!(
                    "slots {} and {} overlap",
                    pair[0].id, pair[1].id
                )));
            }
            if pair[0].id == pair[1].id {
                return Err(AppError::ConfigError(format!(
                    "duplicate slot id {}",
                    pair[0].id
                )));
            }
        }

        Ok(Self { slots })
    }

    /// The period catalog of the original intranet schedule, used when
    /// no grid is configured.
    pub fn standard() -> AppResult<Self> {
        let defs = [
            ("08:30", "09:30", "1°"),
            ("09:40", "10:40", "2°"),
            ("10:50", "11:50", "3°"),
            ("12:00", "13:00", "4°"),
            ("13:10", "14:10", "Alm."),
            ("14:30", "15:30", "5°"),
            ("15:40", "16:40", "6°"),
            ("16:50", "17:50", "7°"),
            ("18:00", "19:00", "8°"),
            ("19:10", "20:10", "9°"),
            ("20:20", "21:20", "10°"),
        ];
        let slots = defs
            .iter()
            .map(|(start, end, period)| make_slot(start, end, period))
            .collect::<AppResult<Vec<_>>>()?;
        Self::new(slots)
    }

    /// Parses a grid override of the form
    /// `"08:30-09:30=1°;09:40-10:40=2°"`.
    pub fn parse(spec: &str) -> AppResult<Self> {
        let mut slots = Vec::new();
        for part in spec.split(';').filter(|p| !p.trim().is_empty()) {
            let (range, label) = part.split_once('=').ok_or_else(|| {
                AppError::ConfigError(format!("slot entry {part:?} is missing '=label'"))
            })?;
            let (start, end) = range.split_once('-').ok_or_else(|| {
                AppError::ConfigError(format!("slot range {range:?} is missing '-'"))
            })?;
            slots.push(make_slot(start.trim(), end.trim(), label.trim())?);
        }
        Self::new(slots)
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Projects every slot onto `date`, interpreting the grid's wall
    /// clock in the given fixed offset.
    pub fn windows_on(&self, date: NaiveDate, offset: FixedOffset) -> Vec<SlotWindow> {
        self.slots
            .iter()
            .map(|slot| SlotWindow {
                slot_id: slot.id.clone(),
                start_at: to_utc(date.and_time(slot.start), offset),
                end_at: to_utc(date.and_time(slot.end), offset),
            })
            .collect()
    }
}

/// `[midnight, next midnight)` of `date` in the given offset, as UTC.
pub fn day_bounds(date: NaiveDate, offset: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = to_utc(date.and_time(NaiveTime::MIN), offset);
    (start, start + Duration::days(1))
}

fn make_slot(start: &str, end: &str, period: &str) -> AppResult<TimeSlot> {
    let parse = |value: &str| {
        NaiveTime::parse_from_str(value, "%H:%M")
            .map_err(|e| AppError::ConfigError(format!("invalid slot time {value:?}: {e}")))
    };
    Ok(TimeSlot {
        id: format!("{start}-{end}"),
        label: format!("{period} ({start}-{end})"),
        start: parse(start)?,
        end: parse(end)?,
    })
}

fn to_utc(local: NaiveDateTime, offset: FixedOffset) -> DateTime<Utc> {
    Utc.from_utc_datetime(&(local - Duration::seconds(offset.local_minus_utc().into())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start: &str, end: &str) -> TimeSlot {
        make_slot(start, end, "x").unwrap()
    }

    #[test]
    fn standard_grid_is_valid_and_ordered() -> anyhow::Result<()> {
        let grid = TimeGrid::standard()?;
        assert_eq!(grid.slots().len(), 11);
        assert_eq!(grid.slots()[0].id, "08:30-09:30");
        assert_eq!(grid.slots()[0].label, "1° (08:30-09:30)");
        assert!(grid
            .slots()
            .windows(2)
            .all(|pair| pair[0].end <= pair[1].start));
        Ok(())
    }

    #[test]
    fn empty_grid_is_a_config_error() {
        let err = TimeGrid::new(vec![]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn inverted_slot_is_a_config_error() {
        let err = TimeGrid::new(vec![slot("10:00", "09:00")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn overlapping_slots_are_a_config_error() {
        let err = TimeGrid::new(vec![slot("09:00", "10:00"), slot("09:30", "10:30")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn back_to_back_slots_are_accepted() -> anyhow::Result<()> {
        let grid = TimeGrid::new(vec![slot("09:00", "10:00"), slot("10:00", "11:00")])?;
        assert_eq!(grid.slots().len(), 2);
        Ok(())
    }

    #[test]
    fn parse_round_trips_a_spec_string() -> anyhow::Result<()> {
        let grid = TimeGrid::parse("08:30-09:30=1°; 09:40-10:40=2°")?;
        assert_eq!(grid.slots().len(), 2);
        assert_eq!(grid.slots()[1].label, "2° (09:40-10:40)");
        Ok(())
    }

    #[test]
    fn parse_rejects_malformed_entries() {
        assert!(TimeGrid::parse("08:30/09:30=1°").is_err());
        assert!(TimeGrid::parse("08:30-09:30").is_err());
        assert!(TimeGrid::parse("25:00-26:00=bad").is_err());
    }

    #[test]
    fn windows_shift_with_the_configured_offset() -> anyhow::Result<()> {
        let grid = TimeGrid::new(vec![slot("09:00", "10:00")])?;
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        let utc = grid.windows_on(date, FixedOffset::east_opt(0).unwrap());
        assert_eq!(utc[0].start_at.to_rfc3339(), "2026-03-02T09:00:00+00:00");

        // 09:00 at UTC-3 is noon UTC.
        let minus_three = grid.windows_on(date, FixedOffset::west_opt(3 * 3600).unwrap());
        assert_eq!(
            minus_three[0].start_at.to_rfc3339(),
            "2026-03-02T12:00:00+00:00"
        );
        Ok(())
    }
}
