pub mod auth;
pub mod calendar;
pub mod cancel;
pub mod conflicts;
pub mod dashboard;
pub mod day;
pub mod delete;
pub mod edit;
pub mod invitations;
pub mod legend;
pub mod move_event;
pub mod new;
pub mod profile;
pub mod recent;
pub mod rsvp;
pub mod show;
pub mod upcoming;
pub mod upload;
pub mod year;

/// Upcoming window: a week back (unfinished events) to two months ahead.
pub const UPCOMING_PAST_DAYS: i64 = 7;
pub const UPCOMING_FUTURE_DAYS: i64 = 60;

/// How far day/month queries widen backwards so multi-day events that
/// started earlier still land in the view. This caps the visible span of
/// a single event: one stretching back further than this drops off, and
/// the cap is the trade against fetching the whole table on every view.
pub const SPAN_LOOKBACK_DAYS: i64 = 31;
