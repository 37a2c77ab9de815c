mod details;
mod panels;
mod tooltip;
