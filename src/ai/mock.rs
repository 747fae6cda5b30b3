use super::{ChatService, Completion};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted [`ChatService`] that records every exchange it receives.
pub struct MockChatClient {
    responses: Arc<Mutex<Vec<Completion>>>,
    failure: Option<String>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, response: String) -> Self {
        self.with_completion(Completion::Message(response))
    }

    pub fn with_completion(self, completion: Completion) -> Self {
        self.responses.lock().unwrap().push(completion);
        self
    }

    /// Make every call fail with a vendor error carrying `message`.
    pub fn with_failure(mut self, message: String) -> Self {
        self.failure = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// `(system, prompt)` pairs in call order.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<Completion> {
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push((system.to_string(), prompt.to_string()));
            requests.len()
        };

        if let Some(message) = &self.failure {
            return Err(Error::Vendor(message.clone()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Completion::Message(format!("You asked: {}", prompt)))
        } else {
            let index = (count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}
