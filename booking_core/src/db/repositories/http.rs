//! Remote backend reached over HTTP.
//!
//! Every request runs under the configured timeout. Responses are normalized
//! into [`AppError`]: elapsed deadlines become timeout errors, non-2xx
//! statuses become server errors carrying the status, and undecodable bodies
//! become invalid-response errors. `404` on single-entity lookups maps to
//! `None`.
//!
//! Bookings arrive as raw records and go through the same transform as the
//! mock backend, so duration, status and detail fields are always derived.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::config::ApiConfig;
use crate::db::repository::{BookingRepository, StationRepository};
use crate::db::transform::{to_booking, to_detail};
use crate::error::{AppError, AppResult};
use crate::models::{Booking, BookingDetail, RawBooking, Station};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RescheduleBody<'a> {
    pickup_date: &'a str,
    return_date: &'a str,
}

/// HTTP repository.
#[derive(Debug, Clone)]
pub struct HttpRepository {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpRepository {
    /// Build a client for `config.base_url`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::unknown(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<F>(&self, request: F) -> AppResult<Response>
    where
        F: Future<Output = Result<Response, reqwest::Error>>,
    {
        let response = tokio::time::timeout(self.timeout, request).await??;
        Ok(response)
    }

    /// Read the whole body under the same deadline and decode it as JSON.
    async fn decode<T: DeserializeOwned>(&self, response: Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            warn!("Request to {} failed with {}", response.url(), status);
            return Err(status_error(status));
        }
        let bytes = tokio::time::timeout(self.timeout, response.bytes()).await??;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.send(self.client.get(&url).send()).await?;
        self.decode(response).await
    }

    /// GET that maps `404` to `None`.
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> AppResult<Option<T>> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.send(self.client.get(&url).send()).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.decode(response).await.map(Some)
    }

    /// Station used to label bookings. A failed lookup is logged and falls
    /// back to the unknown-station label instead of failing the list.
    async fn station_for_bookings(&self, station_id: &str) -> Option<Station> {
        match self.get_station_by_id(station_id).await {
            Ok(station) => station,
            Err(err) => {
                warn!("Station lookup for {} failed: {}", station_id, err);
                None
            }
        }
    }
}

fn status_error(status: StatusCode) -> AppError {
    AppError::server(status.as_u16(), status.canonical_reason().unwrap_or(""))
}

#[async_trait]
impl StationRepository for HttpRepository {
    async fn search_stations(&self, query: &str) -> AppResult<Vec<Station>> {
        let query = query.trim();
        if query.is_empty() {
            return self.get_all_stations().await;
        }
        let url = self.url("/stations");
        debug!("GET {}?search={}", url, query);
        let request = self.client.get(&url).query(&[("search", query)]).send();
        let response = self.send(request).await?;
        self.decode(response).await
    }

    async fn get_all_stations(&self) -> AppResult<Vec<Station>> {
        self.get_json("/stations").await
    }

    async fn get_station_by_id(&self, id: &str) -> AppResult<Option<Station>> {
        self.get_optional(&format!("/stations/{}", id)).await
    }
}

#[async_trait]
impl BookingRepository for HttpRepository {
    async fn get_bookings_for_station(
        &self,
        station_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<Booking>> {
        let path = format!("/stations/{}/bookings", station_id);
        let (raw, station) = tokio::join!(
            self.get_json::<Vec<RawBooking>>(&path),
            self.station_for_bookings(station_id)
        );
        let raw = raw?;

        Ok(raw
            .iter()
            .map(|r| to_booking(r, station.as_ref()))
            .filter(|b| b.overlaps(start, end))
            .collect())
    }

    async fn get_booking_detail(&self, id: &str) -> AppResult<Option<BookingDetail>> {
        let Some(raw) = self
            .get_optional::<RawBooking>(&format!("/bookings/{}", id))
            .await?
        else {
            return Ok(None);
        };
        let station = self
            .station_for_bookings(&raw.pickup_return_station_id)
            .await;
        Ok(Some(to_detail(to_booking(&raw, station.as_ref()))))
    }

    async fn reschedule_booking(
        &self,
        id: &str,
        pickup_date: &str,
        return_date: &str,
    ) -> AppResult<bool> {
        let url = self.url(&format!("/bookings/{}", id));
        debug!("PUT {}", url);
        let body = RescheduleBody {
            pickup_date,
            return_date,
        };
        let response = self.send(self.client.put(&url).json(&body).send()).await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Reschedule of booking {} rejected with {}", id, status);
        }
        Ok(status.is_success())
    }
}
