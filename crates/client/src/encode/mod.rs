//! MP3 encoding around the extracted records.
//!
//! ### Discovery
//! - Walk an item's source directory for WAV/FLAC/MP3 files, keeping one
//!   file per base name (WAV > FLAC > MP3).
//!
//! ### Naming
//! - Output directories are grouped as `<actor>/<brand>/【<key>】<title>`
//!   below the MP3 root, with configurable sanitisation.
//!
//! ### Encoding
//! - An [`EncodeJob`] describes one conversion; an [`Encoder`] runs it.
//! - [`FfmpegEncoder`] renders the job as an `ffmpeg` command line
//!   (libmp3lame, 320 kbps, 48 kHz, ID3v2.3, optional embedded cover).

pub mod discover;
pub mod naming;

mod ffmpeg;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use dlsenc_core::{CanonicalRecord, Error};

pub use discover::find_audio_files;
pub use ffmpeg::FfmpegEncoder;
pub use naming::{actor_dir, output_dir, prepare_output_dir, sanitize, truncate_title};

/// Errors that can occur while running an encoder.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The encoder program could not be started.
    #[error("encoder unavailable: {0}")]
    Unavailable(String),

    /// The encoder ran and reported a failure.
    #[error("encoder exited with {status}: {detail}")]
    Failed { status: String, detail: String },
}

impl From<EncodeError> for Error {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::Unavailable(msg) => Error::DependencyMissing(msg),
            failed @ EncodeError::Failed { .. } => Error::EncodeFailed(failed.to_string()),
        }
    }
}

/// One source file to MP3 conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub artist: String,
    pub album_artist: String,
    pub album: String,
    pub title: String,
    /// Image embedded as the album cover
    pub cover: Option<PathBuf>,
}

impl EncodeJob {
    /// Job converting `input` into `<output_dir>/<stem>.mp3`, tagged from `record`.
    ///
    /// The track title is the input file stem. The record's main image, when
    /// set, becomes the cover.
    pub fn for_record(record: &CanonicalRecord, input: &Path, output_dir: &Path) -> Self {
        let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        let cover = (!record.main_image.is_empty()).then(|| PathBuf::from(&record.main_image));

        Self {
            input: input.to_path_buf(),
            output: output_dir.join(format!("{stem}.mp3")),
            artist: record.actor.clone(),
            album_artist: record.brand.clone(),
            album: record.album_title.clone(),
            title: stem,
            cover,
        }
    }

    /// `ffmpeg` arguments performing this job.
    pub fn to_ffmpeg_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-i".into(), self.input.clone().into()];

        if let Some(cover) = &self.cover {
            args.push("-i".into());
            args.push(cover.clone().into());
            args.extend(
                ["-map", "0:a", "-map", "1:v", "-c:v", "mjpeg", "-metadata:s:v", "title=Album cover"]
                    .map(OsString::from),
            );
        }

        args.extend(["-c:a", "libmp3lame", "-b:a", "320k", "-ar", "48000"].map(OsString::from));
        let tags = [
            ("artist", &self.artist),
            ("album_artist", &self.album_artist),
            ("album", &self.album),
            ("title", &self.title),
        ];
        for (tag, value) in tags {
            args.push("-metadata".into());
            args.push(format!("{tag}={value}").into());
        }
        args.extend(["-id3v2_version", "3", "-y"].map(OsString::from));
        args.push(self.output.clone().into());

        args
    }
}

/// Runs encode jobs.
#[async_trait::async_trait]
pub trait Encoder: Send + Sync {
    /// Perform `job`, writing its output file.
    ///
    /// Dropping the returned future stops the conversion.
    async fn encode(&self, job: &EncodeJob) -> Result<(), EncodeError>;
}
