use parlance::application::services::count_tokens;

#[test]
fn given_empty_text_when_counting_then_zero() {
    assert_eq!(count_tokens(""), 0);
}

#[test]
fn given_longer_text_when_counting_then_more_tokens() {
    let short = count_tokens("Hello world");
    let long = count_tokens("Hello world, this sentence is considerably longer than the first.");

    assert!(short > 0);
    assert!(long > short);
}
