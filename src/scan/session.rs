//! Duplicate suppression for a scanning session
//!
//! A display value must be seen a minimum number of times (two by default)
//! before it is reported. The first confirmation ends the session; later
//! frames are ignored until [`ScanSession::reset`].

use std::collections::HashMap;

use log::{debug, trace};

use crate::config;
use crate::error::KscanError;
use crate::models::{Barcode, BarcodeFormat, DetectedSymbol};
use crate::payload::ByteModeDecoder;

/// Outcome reported by the vision engine for one frame
#[derive(Debug)]
pub enum FrameReport {
    /// Zero or more symbols were detected
    Detected(Vec<DetectedSymbol>),
    /// The engine failed on this frame
    Failed(KscanError),
    /// The engine canceled processing of this frame
    Canceled,
}

/// What the session did with a frame
#[derive(Debug)]
pub enum ScanEvent {
    /// A value reached the confirmation threshold
    Confirmed(Barcode),
    /// Nothing confirmed yet
    Pending,
    /// Engine failure, passed through
    Failed(KscanError),
    /// Engine cancellation, passed through
    Canceled,
    /// The session already confirmed a value; the frame was ignored
    Finished,
}

/// Per-session bookkeeping for confirmed scans
#[derive(Debug)]
pub struct ScanSession {
    requested: Vec<BarcodeFormat>,
    confirmations: u32,
    decoder: ByteModeDecoder,
    sightings: HashMap<String, u32>,
    finished: bool,
}

impl ScanSession {
    /// Session accepting `requested` formats.
    ///
    /// An empty list or one containing [`BarcodeFormat::AllFormats`] accepts
    /// every known format.
    pub fn new(requested: Vec<BarcodeFormat>) -> Self {
        Self {
            requested,
            confirmations: config::confirmations(),
            decoder: ByteModeDecoder::new(),
            sightings: HashMap::new(),
            finished: false,
        }
    }

    /// Override the confirmation threshold (never below two)
    pub fn with_confirmations(mut self, confirmations: u32) -> Self {
        self.confirmations = confirmations.max(2);
        self
    }

    /// Override the payload decoder
    pub fn with_decoder(mut self, decoder: ByteModeDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Sightings needed before a value is confirmed
    pub fn confirmations(&self) -> u32 {
        self.confirmations
    }

    /// True once a value has been confirmed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Forget all sightings and accept new frames again
    pub fn reset(&mut self) {
        self.sightings.clear();
        self.finished = false;
    }

    /// Whether a symbol of `format` counts toward confirmation
    pub fn is_requested(&self, format: BarcodeFormat) -> bool {
        if self.requested.is_empty() || self.requested.contains(&BarcodeFormat::AllFormats) {
            return format.is_concrete();
        }
        self.requested.contains(&format)
    }

    /// Handle one engine report
    pub fn handle(&mut self, report: FrameReport) -> ScanEvent {
        self.handle_filtered(report, |_| true)
    }

    /// Handle one engine report, letting `filter` veto a confirmation
    pub fn handle_filtered<F>(&mut self, report: FrameReport, filter: F) -> ScanEvent
    where
        F: Fn(&Barcode) -> bool,
    {
        if self.finished {
            return ScanEvent::Finished;
        }
        match report {
            FrameReport::Detected(symbols) => match self.observe_filtered(&symbols, filter) {
                Some(barcode) => ScanEvent::Confirmed(barcode),
                None => ScanEvent::Pending,
            },
            FrameReport::Failed(err) => {
                debug!("scan session: engine failure: {err}");
                ScanEvent::Failed(err)
            }
            FrameReport::Canceled => ScanEvent::Canceled,
        }
    }

    /// Count sightings in one frame; returns the confirmed barcode, if any
    pub fn observe(&mut self, symbols: &[DetectedSymbol]) -> Option<Barcode> {
        self.observe_filtered(symbols, |_| true)
    }

    /// Like [`observe`](Self::observe), but a confirmed candidate rejected by
    /// `filter` ends processing of this frame without finishing the session.
    pub fn observe_filtered<F>(&mut self, symbols: &[DetectedSymbol], filter: F) -> Option<Barcode>
    where
        F: Fn(&Barcode) -> bool,
    {
        if self.finished {
            return None;
        }

        for symbol in symbols {
            if !self.is_requested(symbol.format) {
                continue;
            }
            let Some(value) = symbol.display_value.as_deref() else {
                continue;
            };

            let seen = self.sightings.entry(value.to_owned()).or_insert(0);
            *seen += 1;
            trace!("scan session: {value:?} seen {seen} time(s)");
            if *seen < self.confirmations {
                continue;
            }

            let barcode = Barcode {
                data: value.to_owned(),
                format: symbol.format,
                raw_bytes: symbol.resolve_raw_bytes_with(&self.decoder),
            };
            if !filter(&barcode) {
                debug!("scan session: {value:?} rejected by filter");
                return None;
            }

            debug!("scan session: confirmed {} {value:?}", barcode.format);
            self.sightings.clear();
            self.finished = true;
            return Some(barcode);
        }

        None
    }
}
