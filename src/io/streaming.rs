//! # Background Record Streaming
//!
//! Runs a [`VcfRecordReader`] on its own thread and hands records to the
//! consumer over a bounded channel, one record in flight at a time.
//!
//! A fatal reader error is delivered as an `Err` item and closes the stream.
//! If the consumer stops early, dropping the stream disconnects the channel;
//! the producer's next send fails and it exits.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::data::record::VariantRecord;
use crate::error::{McorrError, Result};
use crate::io::vcf::VcfRecordReader;

/// Records buffered between producer and consumer
pub const RECORD_CHANNEL_CAPACITY: usize = 1;

/// Lazily pulled sequence of records produced on a background thread
pub struct RecordStream {
    rx: Option<Receiver<Result<VariantRecord>>>,
    producer: Option<JoinHandle<()>>,
}

impl RecordStream {
    /// Spawn the producer thread for `reader`
    pub fn spawn(reader: VcfRecordReader) -> Result<Self> {
        Self::spawn_iter(reader)
    }

    /// Spawn a producer over any record source
    pub fn spawn_iter<I>(source: I) -> Result<Self>
    where
        I: Iterator<Item = Result<VariantRecord>> + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel::<Result<VariantRecord>>(RECORD_CHANNEL_CAPACITY);

        let producer = thread::Builder::new()
            .name("mcorr-vcf-reader".to_string())
            .spawn(move || {
                for item in source {
                    let is_err = item.is_err();
                    if tx.send(item).is_err() {
                        // Consumer hung up
                        return;
                    }
                    if is_err {
                        return;
                    }
                }
            })?;

        Ok(Self {
            rx: Some(rx),
            producer: Some(producer),
        })
    }

    /// Join the producer, converting a panic into an error
    fn join_producer(&mut self) -> Result<()> {
        match self.producer.take() {
            Some(handle) => handle.join().map_err(|payload| {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "reader thread panicked".to_string());
                McorrError::producer(message)
            }),
            None => Ok(()),
        }
    }
}

impl Iterator for RecordStream {
    type Item = Result<VariantRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let rx = self.rx.as_ref()?;
        match rx.recv() {
            Ok(item) => Some(item),
            Err(_) => {
                // Channel closed: producer finished or died
                self.rx = None;
                self.join_producer().err().map(Err)
            }
        }
    }
}

impl Drop for RecordStream {
    fn drop(&mut self) {
        // Disconnect first so a blocked producer wakes up
        self.rx.take();
        let _ = self.join_producer();
    }
}
