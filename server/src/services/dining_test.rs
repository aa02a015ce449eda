use std::sync::{Arc, Mutex};

use chrono::{Days, Utc};

use super::*;
use crate::services::yelp::{Business, BusinessLocation, NO_RESULTS, SearchResults};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
}

fn filled() -> DiningSlots {
    DiningSlots {
        location: Some("NYC".to_owned()),
        food: Some("japanese".to_owned()),
        date: Some("2024-05-11".to_owned()),
        time: Some("19:30".to_owned()),
        people: Some("4".to_owned()),
    }
}

fn future_date() -> String {
    (Local::now().date_naive() + Days::new(2)).format("%Y-%m-%d").to_string()
}

/// Search stub that records queries and returns canned results.
#[derive(Default)]
struct StubSearch {
    results: SearchResults,
    fail: bool,
    queries: Arc<Mutex<Vec<SearchQuery>>>,
}

#[async_trait::async_trait]
impl RestaurantSearch for StubSearch {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, ResponderError> {
        self.queries.lock().unwrap().push(query.clone());
        if self.fail {
            return Err(ResponderError::Status { status: 401 });
        }
        Ok(self.results.clone())
    }
}

fn sushi_place() -> SearchResults {
    SearchResults {
        businesses: vec![Business {
            name: "Sushi Nakazawa".to_owned(),
            url: "https://www.yelp.com/biz/sushi-nakazawa".to_owned(),
            location: BusinessLocation {
                address1: Some("23 Commerce St".to_owned()),
                city: Some("New York".to_owned()),
                state: Some("NY".to_owned()),
            },
        }],
    }
}

// =============================================================
// validate
// =============================================================

#[test]
fn validate_accepts_complete_valid_slots() {
    assert_eq!(validate(&filled(), today()), Ok(()));
}

#[test]
fn validate_accepts_empty_slots() {
    assert_eq!(validate(&DiningSlots::default(), today()), Ok(()));
}

#[test]
fn validate_accepts_today() {
    let slots = DiningSlots { date: Some("2024-05-10".to_owned()), ..DiningSlots::default() };
    assert_eq!(validate(&slots, today()), Ok(()));
}

#[test]
fn validate_rejects_unparseable_date() {
    let slots = DiningSlots { date: Some("next tuesday".to_owned()), ..filled() };
    assert_eq!(
        validate(&slots, today()),
        Err(SlotViolation { slot: Slot::Date, message: DATE_UNPARSEABLE })
    );
}

#[test]
fn validate_rejects_past_date() {
    let slots = DiningSlots { date: Some("2024-05-09".to_owned()), ..filled() };
    assert_eq!(validate(&slots, today()), Err(SlotViolation { slot: Slot::Date, message: DATE_IN_PAST }));
}

#[test]
fn validate_rejects_time_of_wrong_length() {
    for raw in ["7pm", "7:30", "19:300"] {
        let slots = DiningSlots { time: Some(raw.to_owned()), ..filled() };
        assert_eq!(
            validate(&slots, today()),
            Err(SlotViolation { slot: Slot::Time, message: TIME_INVALID }),
            "{raw}"
        );
    }
}

#[test]
fn validate_rejects_non_numeric_time() {
    for raw in ["ab:cd", "19-30", "+1:30", "25:00"] {
        let slots = DiningSlots { time: Some(raw.to_owned()), ..filled() };
        assert_eq!(
            validate(&slots, today()),
            Err(SlotViolation { slot: Slot::Time, message: TIME_INVALID }),
            "{raw}"
        );
    }
}

#[test]
fn validate_rejects_non_integer_people() {
    for raw in ["four", "2.5", ""] {
        let slots = DiningSlots { people: Some(raw.to_owned()), ..filled() };
        assert_eq!(
            validate(&slots, today()),
            Err(SlotViolation { slot: Slot::PeopleNumber, message: PEOPLE_INVALID }),
            "{raw:?}"
        );
    }
}

#[test]
fn validate_reports_date_before_time() {
    let slots = DiningSlots {
        date: Some("yesterday".to_owned()),
        time: Some("late".to_owned()),
        ..filled()
    };
    assert_eq!(validate(&slots, today()).unwrap_err().slot, Slot::Date);
}

// =============================================================
// dialog
// =============================================================

#[test]
fn dining_request_detection() {
    assert!(is_dining_request("I need some dining suggestions"));
    assert!(is_dining_request("Where should we eat?"));
    assert!(is_dining_request("RESTAURANT please"));
    assert!(!is_dining_request("hello"));
    assert!(!is_dining_request("what's the weather"));
}

#[test]
fn session_asks_for_slots_in_order() {
    let mut session = DiningSession::default();
    let mut asked = Vec::new();
    let answers = ["NYC", "japanese", "2024-05-11", "19:30"];

    let mut turn = session.advance(None, today());
    for answer in answers {
        let DialogTurn::Elicit { slot, .. } = turn else {
            panic!("expected elicitation");
        };
        asked.push(slot);
        turn = session.advance(Some(answer), today());
    }
    let DialogTurn::Elicit { slot, .. } = turn else {
        panic!("expected elicitation");
    };
    asked.push(slot);

    assert_eq!(asked, Slot::ORDER.to_vec());
    assert_eq!(session.advance(Some("4"), today()), DialogTurn::Ready(filled()));
}

#[test]
fn session_clears_and_reasks_rejected_slot() {
    let mut session = DiningSession {
        slots: DiningSlots { people: None, ..filled() },
        awaiting: Some(Slot::PeopleNumber),
    };
    let turn = session.advance(Some("a few"), today());
    assert_eq!(
        turn,
        DialogTurn::Elicit { slot: Slot::PeopleNumber, message: PEOPLE_INVALID.to_owned() }
    );
    assert_eq!(session.slots.people, None);
    assert_eq!(session.awaiting, Some(Slot::PeopleNumber));
}

#[test]
fn session_ignores_blank_answer() {
    let mut session = DiningSession::default();
    session.advance(None, today());
    let turn = session.advance(Some("   "), today());
    assert_eq!(turn, DialogTurn::Elicit { slot: Slot::Location, message: Slot::Location.prompt().to_owned() });
}

#[test]
fn search_query_combines_date_and_time() {
    let query = search_query(&filled(), &Utc).unwrap();
    assert_eq!(query.location, "NYC");
    assert_eq!(query.term, "japanese");
    // 2024-05-11T19:30:00Z
    assert_eq!(query.open_at, 1_715_455_800);
}

#[test]
fn search_query_requires_every_slot() {
    let slots = DiningSlots { food: None, ..filled() };
    assert_eq!(search_query(&slots, &Utc), None);
}

// =============================================================
// DiningResponder
// =============================================================

#[tokio::test]
async fn unrelated_message_gets_greeting() {
    let responder = DiningResponder::new(StubSearch::default());
    assert_eq!(responder.respond("s-1", "hello").await.unwrap(), GREETING);
    assert_eq!(responder.open_sessions().await, 0);
}

#[tokio::test]
async fn full_dialog_recommends_first_business() {
    let queries = Arc::new(Mutex::new(Vec::new()));
    let responder = DiningResponder::new(StubSearch { results: sushi_place(), fail: false, queries: queries.clone() });
    let date = future_date();

    assert_eq!(
        responder.respond("s-1", "I want dining suggestions").await.unwrap(),
        Slot::Location.prompt()
    );
    assert_eq!(responder.respond("s-1", "NYC").await.unwrap(), Slot::Food.prompt());
    assert_eq!(responder.respond("s-1", "japanese").await.unwrap(), Slot::Date.prompt());
    assert_eq!(responder.respond("s-1", &date).await.unwrap(), Slot::Time.prompt());
    assert_eq!(responder.respond("s-1", "19:30").await.unwrap(), Slot::PeopleNumber.prompt());

    let reply = responder.respond("s-1", "2").await.unwrap();
    assert_eq!(
        reply,
        "We recommend Sushi Nakazawa. The address is 23 Commerce St, New York, NY. \
         You can view details at https://www.yelp.com/biz/sushi-nakazawa"
    );

    let queries = queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].location, "NYC");
    assert_eq!(queries[0].term, "japanese");
    drop(queries);
    assert_eq!(responder.open_sessions().await, 0);
}

#[tokio::test]
async fn empty_search_apologises() {
    let responder = DiningResponder::new(StubSearch::default());
    let date = future_date();
    for text in ["restaurant", "NYC", "mexican", date.as_str(), "12:00"] {
        responder.respond("s-1", text).await.unwrap();
    }
    assert_eq!(responder.respond("s-1", "3").await.unwrap(), NO_RESULTS);
}

#[tokio::test]
async fn past_date_is_reasked() {
    let responder = DiningResponder::new(StubSearch::default());
    for text in ["food please", "NYC", "chinese"] {
        responder.respond("s-1", text).await.unwrap();
    }
    assert_eq!(responder.respond("s-1", "2000-01-01").await.unwrap(), DATE_IN_PAST);
    assert_eq!(responder.respond("s-1", "someday").await.unwrap(), DATE_UNPARSEABLE);
    assert_eq!(responder.respond("s-1", &future_date()).await.unwrap(), Slot::Time.prompt());
}

#[tokio::test]
async fn bad_time_and_party_size_are_reasked() {
    let responder = DiningResponder::new(StubSearch::default());
    let date = future_date();
    for text in ["dinner", "NYC", "american", date.as_str()] {
        responder.respond("s-1", text).await.unwrap();
    }
    assert_eq!(responder.respond("s-1", "7pm").await.unwrap(), TIME_INVALID);
    assert_eq!(responder.respond("s-1", "19:00").await.unwrap(), Slot::PeopleNumber.prompt());
    assert_eq!(responder.respond("s-1", "lots").await.unwrap(), PEOPLE_INVALID);
}

#[tokio::test]
async fn sessions_are_independent() {
    let responder = DiningResponder::new(StubSearch::default());
    responder.respond("s-1", "restaurant").await.unwrap();
    responder.respond("s-1", "NYC").await.unwrap();
    assert_eq!(responder.respond("s-2", "lunch").await.unwrap(), Slot::Location.prompt());
    assert_eq!(responder.open_sessions().await, 2);
}

#[tokio::test]
async fn cancel_closes_the_session() {
    let responder = DiningResponder::new(StubSearch::default());
    responder.respond("s-1", "restaurant").await.unwrap();
    assert_eq!(responder.respond("s-1", "Cancel").await.unwrap(), CANCELLED);
    assert_eq!(responder.open_sessions().await, 0);
    assert_eq!(responder.respond("s-1", "NYC").await.unwrap(), GREETING);
}

#[tokio::test]
async fn search_failure_is_an_error_and_closes_the_session() {
    let responder = DiningResponder::new(StubSearch { fail: true, ..StubSearch::default() });
    let date = future_date();
    for text in ["restaurant", "NYC", "japanese", date.as_str(), "18:00"] {
        responder.respond("s-1", text).await.unwrap();
    }
    let err = responder.respond("s-1", "2").await.unwrap_err();
    assert!(matches!(err, ResponderError::Status { status: 401 }));
    assert_eq!(responder.open_sessions().await, 0);
}
