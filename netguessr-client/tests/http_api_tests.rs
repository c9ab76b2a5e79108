
use netguessr_client::{
    ApiError, GameApi, HttpGameApi, JoinOutcome, LeaveOutcome, SessionClient, SessionOptions,
};
use netguessr_core::Membership;
use netguessr_types::{
    CreatePartyRequest, GuessSubmission, ImageErrorReport, JoinPartyQuery, NetWorth, StatCode,
};
use reqwest::Url;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use test_helpers::ScriptedPrompter;
use warp::{Filter, Reply, http::StatusCode};

type Reports = Arc<Mutex<Vec<Value>>>;

/// Starts a stand-in game server on an ephemeral port
fn spawn_server() -> (Url, Reports) {
    let reports: Reports = Arc::new(Mutex::new(Vec::new()));

    let random = warp::path!("celeb" / "random")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(|query: HashMap<String, String>| {
            if query.get("format").map(String::as_str) == Some("json") {
                warp::reply::json(&json!({
                    "name": "Jane Doe",
                    "image": "/img/jane.png",
                    "networth": 5000000
                }))
                .into_response()
            } else {
                warp::reply::html("<div><h1>Jane Doe</h1></div>").into_response()
            }
        });

    let lookup = warp::path!("celeb" / String)
        .and(warp::get())
        .map(|name: String| {
            if name == "Madonna" {
                warp::reply::json(&json!({
                    "name": "Madonna",
                    "image": "https://images.example.com/madonna.png",
                    "networth": "$850,000,000"
                }))
                .into_response()
            } else {
                warp::reply::with_status("No such celeb", StatusCode::NOT_FOUND).into_response()
            }
        });

    let submit = warp::path!("game" / "submit")
        .and(warp::post())
        .and(warp::body::json())
        .map(|body: Value| {
            if body["guess"] == "4000000" {
                let message = if body.get("guess_amt").is_some() {
                    "So close! (with amount)"
                } else {
                    "So close!"
                };
                warp::reply::json(&json!({
                    "statcode": "closeenough",
                    "message": message,
                    "celeb_data": { "name": "Jane Doe", "networth": 5000000 },
                    "score": 10
                }))
                .into_response()
            } else {
                warp::reply::with_status(
                    warp::reply::json(&json!({
                        "message": "You are not currently in a game.",
                        "statcode": "nogame"
                    })),
                    StatusCode::BAD_REQUEST,
                )
                .into_response()
            }
        });

    let restart = warp::path!("game" / "restart")
        .and(warp::get())
        .map(|| "OK".into_response());

    let image_error = warp::path!("manage" / "imageError")
        .and(warp::post())
        .and(warp::body::json())
        .map({
            let reports = reports.clone();
            move |body: Value| {
                reports.lock().unwrap().push(body);
                "OK".into_response()
            }
        });

    let image = warp::path!("img" / "jane.png")
        .and(warp::get())
        .map(|| "PNG".into_response());

    let join = warp::path!("game" / "party" / "join")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(|query: HashMap<String, String>| {
            if query.get("code").map(String::as_str) != Some("ABCD") {
                return warp::reply::with_status("No such room", StatusCode::NOT_FOUND)
                    .into_response();
            }
            if query.get("passcode").map(String::as_str) != Some("hunter2") {
                return warp::reply::with_status("Passcode required", StatusCode::UNAUTHORIZED)
                    .into_response();
            }
            warp::reply::with_header("OK", "set-cookie", "party=ABCD; Path=/").into_response()
        });

    let create = warp::path!("game" / "party" / "create")
        .and(warp::post())
        .and(warp::body::json())
        .map(|body: Value| {
            let room_code = if body.get("passcode").is_some() {
                "PRIV"
            } else {
                "PUBL"
            };
            warp::reply::with_header(
                warp::reply::json(&json!({ "room_code": room_code })),
                "set-cookie",
                format!("party={}; Path=/", room_code),
            )
            .into_response()
        });

    let leave = warp::path!("game" / "party" / "leave")
        .and(warp::get())
        .map(|| {
            warp::reply::with_header("OK", "set-cookie", "party=; Path=/; Max-Age=0")
                .into_response()
        });

    let info = warp::path!("game" / "party" / "info")
        .and(warp::get())
        .and(warp::cookie::optional::<String>("party"))
        .map(|party: Option<String>| match party.filter(|code| !code.is_empty()) {
            Some(code) => warp::reply::json(&json!({
                "stats": { "alice": 3, "bob": 8 },
                "current_user": "alice",
                "code": code
            }))
            .into_response(),
            None => warp::reply::with_status("Not in a party", StatusCode::NOT_FOUND)
                .into_response(),
        });

    let routes = random
        .or(lookup)
        .or(submit)
        .or(restart)
        .or(image_error)
        .or(image)
        .or(join)
        .or(create)
        .or(leave)
        .or(info);

    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let base_url = Url::parse(&format!("http://{}", addr)).unwrap();
    (base_url, reports)
}

fn http_api() -> (HttpGameApi, Reports) {
    let (base_url, reports) = spawn_server();
    (HttpGameApi::new(base_url).unwrap(), reports)
}

#[tokio::test]
async fn test_random_subject_requests_json() {
    let (api, _) = http_api();

    let subject = api.random_subject().await.unwrap();

    assert_eq!(subject.name, "Jane Doe");
    assert_eq!(subject.image, "/img/jane.png");
    assert_eq!(subject.networth, NetWorth::Number(5_000_000.0));
}

#[tokio::test]
async fn test_lookup_subject() {
    let (api, _) = http_api();

    let madonna = api.lookup_subject("Madonna").await.unwrap().unwrap();
    assert_eq!(madonna.networth.to_string(), "$850,000,000");

    assert!(api.lookup_subject("Nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_submit_guess_body_and_verdict() {
    let (api, _) = http_api();

    let plain = api
        .submit_guess(&GuessSubmission {
            guess: "4000000".to_string(),
            guess_amt: None,
        })
        .await
        .unwrap();
    assert_eq!(plain.statcode, StatCode::CloseEnough);
    assert_eq!(plain.message, "So close!");
    assert_eq!(plain.score, Some(10));
    assert_eq!(plain.celeb_data.unwrap().name, "Jane Doe");

    let with_amount = api
        .submit_guess(&GuessSubmission {
            guess: "4000000".to_string(),
            guess_amt: Some(4_000_000.0),
        })
        .await
        .unwrap();
    assert_eq!(with_amount.message, "So close! (with amount)");
}

#[tokio::test]
async fn test_nogame_verdict_is_decoded_despite_400() {
    let (api, _) = http_api();

    let result = api
        .submit_guess(&GuessSubmission {
            guess: "1".to_string(),
            guess_amt: None,
        })
        .await
        .unwrap();

    assert_eq!(result.statcode, StatCode::NoGame);
    assert!(result.score.is_none());
}

#[tokio::test]
async fn test_join_status_codes() {
    let (api, _) = http_api();
    let query = |code: &str, passcode: Option<&str>| JoinPartyQuery {
        code: code.to_string(),
        username: "alice".to_string(),
        passcode: passcode.map(str::to_string),
    };

    let missing = api.join_party(&query("ZZZZ", None)).await;
    assert!(matches!(missing, Err(ApiError::Status(404))));

    let locked = api.join_party(&query("ABCD", None)).await;
    assert!(matches!(locked, Err(ApiError::Status(401))));

    api.join_party(&query("ABCD", Some("hunter2"))).await.unwrap();
}

#[tokio::test]
async fn test_party_membership_follows_session_cookie() {
    let (api, _) = http_api();

    assert!(api.party_info().await.unwrap().is_none());

    let created = api
        .create_party(&CreatePartyRequest {
            passcode: None,
            username: "alice".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.room_code, "PUBL");

    let info = api.party_info().await.unwrap().unwrap();
    assert_eq!(info.code, "PUBL");
    assert_eq!(info.stats.get("bob"), Some(&8));

    api.leave_party().await.unwrap();
    assert!(api.party_info().await.unwrap().is_none());
}

#[tokio::test]
async fn test_image_probe_and_report() {
    let (api, reports) = http_api();

    assert!(api.image_available("/img/jane.png").await.unwrap());
    assert!(!api.image_available("/img/missing.png").await.unwrap());

    api.report_image_error(&ImageErrorReport {
        image_url: "/img/missing.png".to_string(),
        celeb: "Jane Doe".to_string(),
    })
    .await
    .unwrap();

    let reports = reports.lock().unwrap();
    assert_eq!(
        reports.as_slice(),
        &[json!({ "image_url": "/img/missing.png", "celeb": "Jane Doe" })]
    );
}

#[tokio::test]
async fn test_private_join_end_to_end() {
    let (api, reports) = http_api();
    let mut client = SessionClient::new(api, SessionOptions::default());
    let mut prompter = ScriptedPrompter::new(&[Some("ABCD"), Some("alice"), Some("hunter2")]);

    client.start().await.unwrap();
    assert_eq!(client.session().party.membership, Membership::NotInParty);

    let outcome = client.join_party(&mut prompter).await.unwrap();
    assert_eq!(
        outcome,
        JoinOutcome::Joined {
            code: "ABCD".to_string()
        }
    );

    let view = client.view();
    assert_eq!(view.party.code.as_deref(), Some("ABCD"));
    assert_eq!(view.party.scoreboard[0].username, "bob");
    assert!(view.controls.submit);

    let result = client.submit_guess("4000000", None).await.unwrap();
    assert_eq!(result.statcode, StatCode::CloseEnough);
    assert_eq!(
        client.view().result.unwrap().net_worth.as_deref(),
        Some("The net worth of Jane Doe is 5000000")
    );

    assert_eq!(client.leave_party().await.unwrap(), LeaveOutcome::Left);
    assert!(client.refresh_party_info().await.unwrap().is_none());

    // Jane's image is served, so nothing was reported
    assert!(reports.lock().unwrap().is_empty());
}
