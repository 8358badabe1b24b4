// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to run one interactive face swap.
//
// Module responsibilities:
// - `api`: blocking HTTP client for the face-swap service and the wire
//   types its endpoints speak.
// - `config`: the KEY=VALUE settings file that keeps the API key and
//   source image URL between runs.
// - `download`: fetches a finished result image and writes it to a
//   uniquely named local file.
// - `workflow`: the detect / submit / poll sequence that drives one
//   swap job to a terminal state.
// - `ui`: terminal prompts and output around a single run.
//
// Keeping this separation lets the job-driving logic run under test
// with scripted collaborators instead of the live service.
pub mod api;
pub mod config;
pub mod download;
pub mod ui;
pub mod workflow;
