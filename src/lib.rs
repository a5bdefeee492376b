pub mod chat;
pub mod config;
pub mod constants;
pub mod controller;
pub mod network;
pub mod pager;
pub mod ranking;
pub mod widget;
