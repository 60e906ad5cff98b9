use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

lazy_static! {
    /// Comments successfully stored.
    pub static ref COMMENTS_CREATED_TOTAL: IntCounter = register_int_counter!(
        "news_comments_created_total",
        "Comments created on news items"
    )
    .expect("failed to register news_comments_created_total");

    /// Submissions refused before any write (empty, forbidden_word).
    pub static ref COMMENTS_REJECTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "news_comments_rejected_total",
        "Comment submissions rejected by validation segmented by reason",
        &["reason"]
    )
    .expect("failed to register news_comments_rejected_total");

    /// Edit/delete attempts by operation and outcome (ok, invalid, not_found).
    pub static ref COMMENT_MUTATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "news_comment_mutations_total",
        "Comment edit and delete attempts segmented by outcome",
        &["op", "outcome"]
    )
    .expect("failed to register news_comment_mutations_total");
}

pub fn record_created() {
    COMMENTS_CREATED_TOTAL.inc();
}

pub fn record_rejected(reason: &str) {
    COMMENTS_REJECTED_TOTAL.with_label_values(&[reason]).inc();
}

pub fn record_mutation(op: &str, outcome: &str) {
    COMMENT_MUTATIONS_TOTAL
        .with_label_values(&[op, outcome])
        .inc();
}
