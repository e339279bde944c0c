use chrono::{Datelike, Duration, NaiveDate, NaiveTime, SecondsFormat, Weekday};
use reqwest::Method;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::RecordsClient;

use crate::models::{BookedAppointment, DaySlotsResponse, Schedule, ScheduleError, TimeSlot};

/// Map a calendar date onto the schedule day-of-week convention
/// (0 = Sunday, 1 = Monday, etc.).
pub fn day_of_week(date: NaiveDate) -> i32 {
    match date.weekday() {
        Weekday::Sun => 0,
        Weekday::Mon => 1,
        Weekday::Tue => 2,
        Weekday::Wed => 3,
        Weekday::Thu => 4,
        Weekday::Fri => 5,
        Weekday::Sat => 6,
    }
}

/// Derive the bookable slots one schedule yields for one date.
///
/// Slots step through `[start_time, end_time)` at the given granularity; a
/// trailing remainder shorter than the granularity is not emitted. A slot
/// whose interval contains the start of a blocking booking comes out bound
/// to that appointment and unavailable.
pub fn derive_slots(
    schedule: &Schedule,
    date: NaiveDate,
    bookings: &[BookedAppointment],
    granularity: Duration,
) -> Vec<TimeSlot> {
    if granularity <= Duration::zero() {
        return Vec::new();
    }
    if !schedule.is_active || schedule.day_of_week != day_of_week(date) {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut current = schedule.start_time;

    loop {
        let (slot_end, wrapped) = current.overflowing_add_signed(granularity);
        if wrapped != 0 || slot_end > schedule.end_time {
            break;
        }

        let booking = bookings.iter().find(|b| {
            b.blocks_slot()
                && b.start_time.date_naive() == date
                && starts_within(b.start_time.time(), current, slot_end)
        });

        slots.push(match booking {
            Some(b) => TimeSlot::booked(current, slot_end, b.id),
            None => TimeSlot::open(current, slot_end),
        });

        current = slot_end;
    }

    slots
}

fn starts_within(time: NaiveTime, slot_start: NaiveTime, slot_end: NaiveTime) -> bool {
    time >= slot_start && time < slot_end
}

pub struct SlotService {
    records: RecordsClient,
    granularity: Duration,
}

impl SlotService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            records: RecordsClient::new(config),
            granularity: Duration::minutes(config.slot_granularity_minutes),
        }
    }

    /// Derive the full slot sequence for one doctor on one date.
    pub async fn slots_for_date(
        &self,
        doctor_id: i64,
        date: NaiveDate,
        auth_token: Option<&str>,
    ) -> Result<DaySlotsResponse, ScheduleError> {
        debug!("Deriving slots for doctor {} on {}", doctor_id, date);

        let path = format!(
            "/api/v1/schedules?doctor_id={}&day_of_week={}",
            doctor_id,
            day_of_week(date)
        );
        let schedules: Vec<Schedule> =
            self.records.request(Method::GET, &path, auth_token, None).await?;

        let bookings = self.bookings_for_date(doctor_id, date, auth_token).await?;

        let mut slots: Vec<TimeSlot> = schedules
            .iter()
            .flat_map(|schedule| derive_slots(schedule, date, &bookings, self.granularity))
            .collect();

        slots.sort_by_key(|s| s.start_time);
        let slots = remove_overlapping(slots);

        debug!("Derived {} slots for doctor {} on {}", slots.len(), doctor_id, date);
        Ok(DaySlotsResponse {
            doctor_id,
            date,
            slots,
        })
    }

    async fn bookings_for_date(
        &self,
        doctor_id: i64,
        date: NaiveDate,
        auth_token: Option<&str>,
    ) -> Result<Vec<BookedAppointment>, ScheduleError> {
        let from = date.and_time(NaiveTime::MIN).and_utc();
        let to = from + Duration::days(1);

        let path = format!(
            "/api/v1/appointments?doctor_id={}&from={}&to={}",
            doctor_id,
            from.to_rfc3339_opts(SecondsFormat::Secs, true),
            to.to_rfc3339_opts(SecondsFormat::Secs, true)
        );

        let bookings = self.records.request(Method::GET, &path, auth_token, None).await?;
        Ok(bookings)
    }
}

fn remove_overlapping(slots: Vec<TimeSlot>) -> Vec<TimeSlot> {
    let mut result: Vec<TimeSlot> = Vec::new();

    for slot in slots {
        let overlaps = result
            .last()
            .is_some_and(|last| slot.start_time < last.end_time);
        if !overlaps {
            result.push(slot);
        }
    }

    result
}
