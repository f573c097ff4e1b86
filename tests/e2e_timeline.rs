//! E2E tests for post fan-out and newsfeeds

mod common;

use common::TestNetwork;
use minigram::data::EdgeStatus;

#[test]
fn test_alice_and_bob_walkthrough() {
    let mut network = TestNetwork::new();
    let directory = &mut network.state.directory;
    let alice = directory.register("alice", "bob123", "NY").unwrap();
    let bob = directory.register("bob", "secret9", "LA").unwrap();

    directory.send_friend_request(alice, bob).unwrap();
    directory.accept_friend_requests(bob).unwrap();
    directory.add_post(alice, "hello").unwrap();

    assert_eq!(network.feed_contents(bob), vec!["hello"]);
    assert_eq!(network.post_contents(alice), vec!["hello"]);
    assert!(network.feed_contents(alice).is_empty());
}

#[test]
fn test_fan_out_reaches_active_friends_only() {
    let mut network = TestNetwork::new();
    let a = network.register("a");
    let b = network.register("b");
    let c = network.register("c");
    let d = network.register("d");
    let e = network.register("e");
    network.befriend(a, b);
    network.befriend(c, a);
    network.befriend(a, d);
    network
        .state
        .directory
        .set_edge_status(a, d, EdgeStatus::Inactive)
        .unwrap();

    network.state.directory.add_post(a, "x").unwrap();

    assert_eq!(network.feed_contents(b), vec!["x"]);
    assert_eq!(network.feed_contents(c), vec!["x"]);
    assert!(network.feed_contents(d).is_empty());
    assert!(network.feed_contents(e).is_empty());
    assert_eq!(network.post_contents(a), vec!["x"]);
}

#[test]
fn test_newsfeed_entries_are_copies() {
    let mut network = TestNetwork::new();
    let alice = network.register("alice");
    let bob = network.register("bob");
    network.befriend(alice, bob);

    let post = network.state.directory.add_post(alice, "shared").unwrap();
    let feed = network.state.directory.newsfeed(bob).unwrap();

    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0], post);
    assert_eq!(network.state.directory.own_posts(alice).unwrap()[0], post);
}

#[test]
fn test_no_retroactive_changes() {
    let mut network = TestNetwork::new();
    let alice = network.register("alice");
    let bob = network.register("bob");

    network.state.directory.add_post(alice, "before").unwrap();
    network.befriend(alice, bob);
    network.state.directory.add_post(alice, "during").unwrap();
    network
        .state
        .directory
        .set_edge_status(alice, bob, EdgeStatus::Inactive)
        .unwrap();
    network.state.directory.add_post(alice, "after").unwrap();

    assert_eq!(network.feed_contents(bob), vec!["during"]);
    assert_eq!(network.post_contents(alice), vec!["after", "during", "before"]);
}

#[test]
fn test_newsfeed_merges_friends_most_recent_first() {
    let mut network = TestNetwork::new();
    let reader = network.register("reader");
    let first = network.register("first");
    let second = network.register("second");
    network.befriend(reader, first);
    network.befriend(reader, second);

    network.state.directory.add_post(first, "one").unwrap();
    network.state.directory.add_post(second, "two").unwrap();
    network.state.directory.add_post(first, "three").unwrap();

    assert_eq!(network.feed_contents(reader), vec!["three", "two", "one"]);
    // Viewing does not consume.
    assert_eq!(network.feed_contents(reader).len(), 3);
}
