// Loads a problems file from disk and plays it through a session.

use std::io::Write;
use std::time::Duration;

use gophercises::quiz::{Outcome, ProblemSet, QuizSession};
use gophercises::LoadError;

fn problems_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test(start_paused = true)]
async fn test_file_to_summary() {
    let file = problems_file("5+5,10\n7+3,10\n1+1,2\n");
    let problems = ProblemSet::from_path(file.path()).unwrap();

    let answers = "10\n 10\t\n3\n".as_bytes();
    let mut session = QuizSession::new(problems, Duration::from_secs(10), answers, Vec::<u8>::new());
    let summary = session.run().await.unwrap();

    assert_eq!(summary.correct, 2);
    assert_eq!(summary.presented, 3);
    assert_eq!(summary.outcome, Outcome::Completed);
    assert!(summary.correct <= summary.presented && summary.presented <= summary.total);
}

#[test]
fn test_malformed_file_aborts_before_any_question() {
    let file = problems_file("5+5,10\n7+3\n");
    let err = ProblemSet::from_path(file.path()).unwrap_err();

    assert!(matches!(err, LoadError::Malformed { record: 2, fields: 1 }));
    assert_eq!(err.to_string(), "record 2 has 1 fields, expected 2 (question, answer)");
}
