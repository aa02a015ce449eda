//! Dining-suggestion dialog.
//!
//! DESIGN
//! ======
//! A conversation is keyed by session. An utterance that asks for a
//! restaurant opens a dialog; each later utterance fills the slot the bot
//! last asked for. After every answer all filled slots are validated. A
//! rejected slot is cleared and asked again with the rejection message.
//! Once every slot holds a valid value the session closes and a single
//! restaurant search produces the reply.
//!
//! Dates and times are read in the server's local time zone.

#[cfg(test)]
#[path = "dining_test.rs"]
mod dining_test;

use std::collections::HashMap;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use tokio::sync::Mutex;

use super::responder::{Responder, ResponderError};
use super::yelp::{RestaurantSearch, SearchQuery, describe_results};

pub const DATE_UNPARSEABLE: &str = "I did not understand that, what date do you want to order?";
pub const DATE_IN_PAST: &str = "You could only order the date from today. What date do you want to go?";
pub const TIME_INVALID: &str = "Please re-enter your time.";
pub const PEOPLE_INVALID: &str = "Please re-enter your number.";
pub const GREETING: &str = "Hi there! I can suggest a restaurant. Tell me you are looking for a place to eat.";
pub const CANCELLED: &str = "Okay, I have cancelled your dining request.";

const INTENT_WORDS: &[&str] = &[
    "dining", "dine", "restaurant", "restaurants", "eat", "food", "dinner", "lunch", "breakfast", "hungry", "suggest",
    "suggestion", "suggestions",
];

/// One piece of information the search needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Location,
    Food,
    Date,
    Time,
    PeopleNumber,
}

impl Slot {
    /// Order in which missing slots are asked for.
    pub const ORDER: [Slot; 5] = [Slot::Location, Slot::Food, Slot::Date, Slot::Time, Slot::PeopleNumber];

    pub fn prompt(self) -> &'static str {
        match self {
            Self::Location => "Which city are you looking to dine in?",
            Self::Food => "What cuisine would you like to try?",
            Self::Date => "What date do you want to go? Please use YYYY-MM-DD.",
            Self::Time => "What time? Please use HH:MM.",
            Self::PeopleNumber => "How many people are in your party?",
        }
    }
}

/// Slot values collected so far, stored as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiningSlots {
    pub location: Option<String>,
    pub food: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub people: Option<String>,
}

impl DiningSlots {
    pub fn get(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Location => self.location.as_deref(),
            Slot::Food => self.food.as_deref(),
            Slot::Date => self.date.as_deref(),
            Slot::Time => self.time.as_deref(),
            Slot::PeopleNumber => self.people.as_deref(),
        }
    }

    pub fn set(&mut self, slot: Slot, value: Option<String>) {
        let target = match slot {
            Slot::Location => &mut self.location,
            Slot::Food => &mut self.food,
            Slot::Date => &mut self.date,
            Slot::Time => &mut self.time,
            Slot::PeopleNumber => &mut self.people,
        };
        *target = value;
    }

    pub fn next_missing(&self) -> Option<Slot> {
        Slot::ORDER.into_iter().find(|slot| self.get(*slot).is_none())
    }
}

/// A slot value that cannot be used, with the message that re-asks for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotViolation {
    pub slot: Slot,
    pub message: &'static str,
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// `HH:MM`, exactly five characters, within a single day.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let (hour, minute) = raw.split_once(':')?;
    if hour.len() != 2 || minute.len() != 2 || !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour = hour.parse::<u32>().ok()?;
    let minute = minute.parse::<u32>().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

pub fn parse_people(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Check every filled slot. Empty slots are not violations.
///
/// # Errors
///
/// Returns the first violated slot in date, time, party-size order.
pub fn validate(slots: &DiningSlots, today: NaiveDate) -> Result<(), SlotViolation> {
    if let Some(raw) = slots.date.as_deref() {
        let Some(date) = parse_date(raw) else {
            return Err(SlotViolation { slot: Slot::Date, message: DATE_UNPARSEABLE });
        };
        if date < today {
            return Err(SlotViolation { slot: Slot::Date, message: DATE_IN_PAST });
        }
    }

    if let Some(raw) = slots.time.as_deref() {
        if parse_time(raw).is_none() {
            return Err(SlotViolation { slot: Slot::Time, message: TIME_INVALID });
        }
    }

    if let Some(raw) = slots.people.as_deref() {
        if parse_people(raw).is_none() {
            return Err(SlotViolation { slot: Slot::PeopleNumber, message: PEOPLE_INVALID });
        }
    }

    Ok(())
}

/// Whether an utterance asks for a dining suggestion.
pub fn is_dining_request(text: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .any(|word| INTENT_WORDS.contains(&word.as_str()))
}

fn is_cancel(text: &str) -> bool {
    matches!(text.trim().to_lowercase().as_str(), "cancel" | "stop" | "never mind" | "nevermind")
}

/// Build the search for a fully validated slot set.
pub fn search_query<Tz: TimeZone>(slots: &DiningSlots, tz: &Tz) -> Option<SearchQuery> {
    let date = parse_date(slots.date.as_deref()?)?;
    let time = parse_time(slots.time.as_deref()?)?;
    let local = NaiveDateTime::new(date, time);
    let open_at = tz
        .from_local_datetime(&local)
        .earliest()
        .map_or_else(|| local.and_utc().timestamp(), |dt| dt.timestamp());
    Some(SearchQuery {
        location: slots.location.clone()?,
        term: slots.food.clone()?,
        open_at,
    })
}

/// Result of feeding one utterance into a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogTurn {
    /// Ask the user for `slot`; `message` is what the bot says.
    Elicit { slot: Slot, message: String },
    /// Every slot is valid; run the search.
    Ready(DiningSlots),
}

/// An open dialog for one session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiningSession {
    pub slots: DiningSlots,
    pub awaiting: Option<Slot>,
}

impl DiningSession {
    /// Store `answer` for the slot being asked, validate, and pick the next turn.
    pub fn advance(&mut self, answer: Option<&str>, today: NaiveDate) -> DialogTurn {
        if let (Some(slot), Some(answer)) = (self.awaiting, answer) {
            let answer = answer.trim();
            if !answer.is_empty() {
                self.slots.set(slot, Some(answer.to_owned()));
            }
        }

        if let Err(violation) = validate(&self.slots, today) {
            self.slots.set(violation.slot, None);
            self.awaiting = Some(violation.slot);
            return DialogTurn::Elicit { slot: violation.slot, message: violation.message.to_owned() };
        }

        match self.slots.next_missing() {
            Some(slot) => {
                self.awaiting = Some(slot);
                DialogTurn::Elicit { slot, message: slot.prompt().to_owned() }
            }
            None => DialogTurn::Ready(self.slots.clone()),
        }
    }
}

/// Responder that runs the dining dialog and answers with a restaurant.
pub struct DiningResponder<S> {
    search: S,
    sessions: Mutex<HashMap<String, DiningSession>>,
}

impl<S: RestaurantSearch> DiningResponder<S> {
    pub fn new(search: S) -> Self {
        Self { search, sessions: Mutex::new(HashMap::new()) }
    }

    /// Number of sessions with an open dialog.
    pub async fn open_sessions(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[async_trait::async_trait]
impl<S: RestaurantSearch + 'static> Responder for DiningResponder<S> {
    fn name(&self) -> &'static str {
        "dining"
    }

    async fn respond(&self, user_id: &str, text: &str) -> Result<String, ResponderError> {
        if is_cancel(text) {
            self.sessions.lock().await.remove(user_id);
            return Ok(CANCELLED.to_owned());
        }

        let today = Local::now().date_naive();
        let in_dialog = self.sessions.lock().await.contains_key(user_id);
        if !in_dialog && !is_dining_request(text) {
            return Ok(GREETING.to_owned());
        }

        // Validation rejections are returned as the elicitation message.
        let answer = if in_dialog { Some(text) } else { None };
        let ready = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions.entry(user_id.to_owned()).or_default();
            let turn = session.advance(answer, today);
            match turn {
                DialogTurn::Elicit { message, .. } => return Ok(message),
                DialogTurn::Ready(slots) => {
                    sessions.remove(user_id);
                    slots
                }
            }
        };

        let query = search_query(&ready, &Local)
            .ok_or_else(|| ResponderError::Parse("dining slots incomplete after validation".to_owned()))?;
        tracing::info!(location = %query.location, term = %query.term, open_at = query.open_at, "dining search");
        let results = self.search.search(&query).await?;
        Ok(describe_results(&results))
    }
}
