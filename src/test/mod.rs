mod credentials;
mod history_report;
mod normalize;
mod order;
mod position;
mod static_reports;
