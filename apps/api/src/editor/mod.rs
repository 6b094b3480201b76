// Editor session: the canvas that mirrors the document, the controller that
// owns it, and the HTTP handlers the browser shell talks to.

pub mod canvas;
pub mod controller;
pub mod handlers;
