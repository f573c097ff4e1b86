//! Interactive shell
//!
//! Prompts with inquire and renders results. Holds no state of its own:
//! every action resolves usernames through the directory and calls one
//! core operation.

use std::fmt;

use chrono::Local;
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use minigram::AppState;
use minigram::data::{Post, UserHandle};
use minigram::error::AppError;
use minigram::service::FriendRequestOutcome;

#[derive(Debug, Clone, Copy)]
enum MainChoice {
    SignUp,
    LogIn,
    Exit,
}

impl fmt::Display for MainChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainChoice::SignUp => write!(f, "Sign up"),
            MainChoice::LogIn => write!(f, "Log in"),
            MainChoice::Exit => write!(f, "Exit"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MenuChoice {
    Newsfeed,
    OwnPosts,
    AddPost,
    SendFriendRequest,
    AcceptFriendRequests,
    Notifications,
    SendMessage,
    ViewMessages,
    SearchUsers,
    Friends,
    LogOut,
}

impl MenuChoice {
    const ALL: [MenuChoice; 11] = [
        MenuChoice::Newsfeed,
        MenuChoice::OwnPosts,
        MenuChoice::AddPost,
        MenuChoice::SendFriendRequest,
        MenuChoice::AcceptFriendRequests,
        MenuChoice::Notifications,
        MenuChoice::SendMessage,
        MenuChoice::ViewMessages,
        MenuChoice::SearchUsers,
        MenuChoice::Friends,
        MenuChoice::LogOut,
    ];
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuChoice::Newsfeed => "View feed",
            MenuChoice::OwnPosts => "View own posts",
            MenuChoice::AddPost => "Add post",
            MenuChoice::SendFriendRequest => "Send friend request",
            MenuChoice::AcceptFriendRequests => "Accept friend requests",
            MenuChoice::Notifications => "View notifications",
            MenuChoice::SendMessage => "Send message",
            MenuChoice::ViewMessages => "View messages",
            MenuChoice::SearchUsers => "Search users",
            MenuChoice::Friends => "View friends list",
            MenuChoice::LogOut => "Log out",
        };
        f.write_str(label)
    }
}

/// Run the shell until the user picks Exit or presses Esc at the top level
pub fn run(state: &mut AppState) -> anyhow::Result<()> {
    println!("\n  MINIGRAM\n");

    loop {
        let choice = ask(
            Select::new(
                "What would you like to do?",
                vec![MainChoice::SignUp, MainChoice::LogIn, MainChoice::Exit],
            )
            .prompt(),
        )?;

        match choice {
            Some(MainChoice::SignUp) => sign_up(state)?,
            Some(MainChoice::LogIn) => {
                if let Some(user) = log_in(state)? {
                    session(state, user)?;
                }
            }
            Some(MainChoice::Exit) | None => {
                println!("\nExiting program");
                return Ok(());
            }
        }
    }
}

/// Treat Esc as "go back"; every other prompt failure is an error
fn ask<T>(answer: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(error) => Err(error.into()),
    }
}

fn password_prompt(message: &str) -> Password<'_> {
    Password::new(message)
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
}

fn sign_up(state: &mut AppState) -> anyhow::Result<()> {
    println!("\n=== Signup ===");
    let Some(username) = ask(Text::new("Username:").prompt())? else {
        return Ok(());
    };
    if state.directory.lookup(username.trim()).is_some() {
        println!("Username already exists.");
        return Ok(());
    }

    let message = format!(
        "Password ({} characters min):",
        state.config.auth.min_password_len
    );
    let Some(password) = ask(password_prompt(&message).prompt())? else {
        return Ok(());
    };
    let Some(city) = ask(Text::new("City:").prompt())? else {
        return Ok(());
    };

    match state.directory.register(username.trim(), &password, &city) {
        Ok(_) => println!("\nSignup successful!"),
        Err(AppError::Validation(reason)) => println!("\n{reason}"),
        Err(error) => println!("\n{error}"),
    }
    Ok(())
}

fn log_in(state: &mut AppState) -> anyhow::Result<Option<UserHandle>> {
    println!("\n--- Login ---");
    let Some(username) = ask(Text::new("Username:").prompt())? else {
        return Ok(None);
    };

    let mut attempt = match state.directory.begin_login(username.trim()) {
        Ok(attempt) => attempt,
        Err(_) => {
            println!("\nInvalid username.");
            return Ok(None);
        }
    };

    loop {
        let Some(password) = ask(password_prompt("Password:").prompt())? else {
            return Ok(None);
        };
        match attempt.try_password(&mut state.directory, &password) {
            Ok(user) => {
                println!("\nLogin successful!");
                return Ok(Some(user));
            }
            Err(AppError::InvalidCredentials { .. }) => {
                println!("\nIncorrect password. Try again.");
            }
            Err(AppError::TooManyAttempts) => {
                println!("\nToo many failed attempts. Returning to main menu.");
                return Ok(None);
            }
            Err(error) => {
                println!("\n{error}");
                return Ok(None);
            }
        }
    }
}

fn session(state: &mut AppState, user: UserHandle) -> anyhow::Result<()> {
    loop {
        let title = format!("Welcome {}", state.directory.username(user));
        let Some(choice) = ask(Select::new(&title, MenuChoice::ALL.to_vec()).prompt())? else {
            return Ok(());
        };

        match choice {
            MenuChoice::Newsfeed => {
                println!("\nYour Newsfeed:");
                print_posts(&state.directory.newsfeed(user)?);
            }
            MenuChoice::OwnPosts => {
                println!("\nYour Posts:");
                print_posts(&state.directory.own_posts(user)?);
            }
            MenuChoice::AddPost => {
                let Some(content) = ask(Text::new("Post content:").prompt())? else {
                    continue;
                };
                match state.directory.add_post(user, &content) {
                    Ok(_) => println!("Post added."),
                    Err(error) => println!("{error}"),
                }
            }
            MenuChoice::SendFriendRequest => {
                let Some(target) = prompt_user(state, "Username to send a friend request to:")?
                else {
                    continue;
                };
                match state.directory.send_friend_request(user, target) {
                    Ok(FriendRequestOutcome::Sent) => println!(
                        "\nFriend request sent to {}",
                        state.directory.username(target)
                    ),
                    Ok(FriendRequestOutcome::AlreadyConnected) => {
                        println!("\nFriend request already sent or already friends.")
                    }
                    Err(error) => println!("\n{error}"),
                }
            }
            MenuChoice::AcceptFriendRequests => {
                let pending = state.directory.pending_friend_requests(user)?;
                if pending.is_empty() {
                    println!("\nNo pending friend requests.");
                    continue;
                }
                println!("\nPending Friend Requests:");
                for requester in &pending {
                    println!("{}", state.directory.username(*requester));
                }
                for friend in state.directory.accept_friend_requests(user)? {
                    println!(
                        "\nYou are now friends with {}",
                        state.directory.username(friend)
                    );
                }
            }
            MenuChoice::Notifications => {
                let notifications = state.directory.take_notifications(user)?;
                if notifications.is_empty() {
                    println!("\nNo new notifications.");
                } else {
                    println!("\nNotifications:");
                    for notification in notifications {
                        println!("{notification}");
                    }
                }
            }
            MenuChoice::SendMessage => {
                let Some(target) = prompt_user(state, "Username to message:")? else {
                    continue;
                };
                let Some(text) = ask(Text::new("Message:").prompt())? else {
                    continue;
                };
                match state.directory.send_message(user, target, &text) {
                    Ok(()) => println!("Message sent."),
                    Err(error) => println!("{error}"),
                }
            }
            MenuChoice::ViewMessages => {
                let Some(peer) = prompt_user(state, "Username to view messages with:")? else {
                    continue;
                };
                let messages = state.directory.messages(user, peer)?;
                let peer_name = state.directory.username(peer);
                if messages.is_empty() {
                    println!("\nNo messages with {peer_name}");
                } else {
                    println!("\nMessages with {peer_name}:");
                    for message in messages {
                        println!("{message}");
                    }
                }
            }
            MenuChoice::SearchUsers => {
                println!("\n======= Search Users =======");
                println!("Users in the network:");
                for username in state.directory.list_all_sorted() {
                    println!("{username}");
                }
            }
            MenuChoice::Friends => {
                println!("\nYour Friends:");
                for friend in state.directory.friends(user)? {
                    println!("{} ({})", friend.username, friend.status.as_str());
                }
            }
            MenuChoice::LogOut => {
                println!("Logged out from {}", state.directory.username(user));
                return Ok(());
            }
        }
    }
}

/// Ask for a username and resolve it, reporting unknown names
fn prompt_user(state: &AppState, message: &str) -> anyhow::Result<Option<UserHandle>> {
    let Some(username) = ask(Text::new(message).prompt())? else {
        return Ok(None);
    };
    let handle = state.directory.lookup(username.trim());
    if handle.is_none() {
        println!("\nUser not found.");
    }
    Ok(handle)
}

fn print_posts(posts: &[Post]) {
    for post in posts {
        let posted_on = post.created_at.with_timezone(&Local);
        println!("Posted on: {}", posted_on.format("%a %b %e %H:%M:%S %Y"));
        println!("{}\n", post.content);
    }
}
