//! Core live face detection pipeline: webcam capture, Haar-cascade
//! detection, box annotation, on-screen display, and snapshot
//! persistence behind small injectable interfaces.

pub mod annotation;
pub mod capture;
pub mod detection;
pub mod display;
pub mod persistence;
pub mod pipeline;
pub mod shared;
