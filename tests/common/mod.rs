// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

use chrono::{DateTime, Utc};
use pennywise::api::ApiClient;
use pennywise::config::Config;
use pennywise::models::{Budget, Category, Expense, Goal, Income, IncomeSource, User};
use pennywise::session::Session;
use pennywise::utils::parse_timestamp;
use rust_decimal::Decimal;

pub fn ts(s: &str) -> DateTime<Utc> {
    parse_timestamp(s).unwrap()
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn income(id: &str, amount: &str, date: &str, source: IncomeSource) -> Income {
    Income {
        id: id.into(),
        description: format!("income {}", id),
        amount: dec(amount),
        date: ts(date),
        source,
    }
}

pub fn expense(id: &str, amount: &str, date: &str, category: Category) -> Expense {
    Expense {
        id: id.into(),
        description: format!("expense {}", id),
        amount: dec(amount),
        date: ts(date),
        category,
    }
}

pub fn budget(id: &str, category: Category, amount: &str, start: &str, end: &str) -> Budget {
    Budget {
        id: id.into(),
        category,
        amount: dec(amount),
        start_date: ts(start),
        end_date: ts(end),
    }
}

pub fn goal(id: &str, target: &str, saved: &str, date: &str) -> Goal {
    Goal {
        id: id.into(),
        name: format!("goal {}", id),
        target_amount: dec(target),
        saved_amount: dec(saved),
        target_date: ts(date),
        description: None,
    }
}

pub fn session() -> Session {
    Session::new(
        "tok-123",
        User {
            id: "u1".into(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
        },
    )
}

/// One request as seen by [`MockServer`].
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Answers one connection per scripted `(status, body)` pair, in order.
pub struct MockServer {
    pub base_url: String,
    handle: JoinHandle<Vec<Recorded>>,
}

impl MockServer {
    pub fn start(script: Vec<(u16, &str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let script: Vec<(u16, String)> = script.into_iter().map(|(s, b)| (s, b.to_string())).collect();
        let handle = std::thread::spawn(move || {
            let mut seen = Vec::new();
            for (status, body) in script {
                let (mut stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let mut parts = line.split_whitespace();
                let method = parts.next().unwrap_or_default().to_string();
                let path = parts.next().unwrap_or_default().to_string();
                let mut headers = Vec::new();
                loop {
                    let mut h = String::new();
                    reader.read_line(&mut h).unwrap();
                    let h = h.trim_end();
                    if h.is_empty() {
                        break;
                    }
                    if let Some((k, v)) = h.split_once(':') {
                        headers.push((k.trim().to_lowercase(), v.trim().to_string()));
                    }
                }
                let len = headers
                    .iter()
                    .find(|(k, _)| k == "content-length")
                    .and_then(|(_, v)| v.parse::<usize>().ok())
                    .unwrap_or(0);
                let mut buf = vec![0u8; len];
                reader.read_exact(&mut buf).unwrap();
                seen.push(Recorded {
                    method,
                    path,
                    headers,
                    body: String::from_utf8(buf).unwrap(),
                });
                let reply = format!(
                    "HTTP/1.1 {} Scripted\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                stream.write_all(reply.as_bytes()).unwrap();
                stream.flush().unwrap();
            }
            seen
        });
        Self { base_url, handle }
    }

    pub fn config(&self) -> Config {
        Config {
            api_url: self.base_url.clone(),
            timeout_secs: 5,
            ..Config::default()
        }
    }

    pub fn client(&self, session: Option<Session>) -> ApiClient {
        ApiClient::new(&self.config(), session).unwrap()
    }

    /// Waits for the script to run out and returns every request received.
    pub fn finish(self) -> Vec<Recorded> {
        self.handle.join().unwrap()
    }
}
