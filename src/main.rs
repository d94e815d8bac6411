use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tunecellar::auth::{User, UserManager};
use tunecellar::model::LibraryModel;
use tunecellar::{catalog, storage, Catalog, Song};

#[derive(Parser, Debug)]
#[command(name = "tunecellar")]
#[command(about = "Personal music library manager", long_about = None)]
struct Args {
    /// Directory holding the catalog index (albums.txt) and album files
    #[arg(short = 'c', long, default_value = "catalog")]
    catalog: PathBuf,

    /// Directory for user accounts and library snapshots
    #[arg(short = 'd', long, default_value = "data")]
    data_dir: PathBuf,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", args.data_dir))?;

    let catalog = Arc::new(catalog::load_catalog(&args.catalog)?);
    let mut users = UserManager::open(&args.data_dir)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Welcome to Tunecellar!");
    let Some(user) = authenticate(&mut users, &mut input)? else {
        println!("Goodbye!");
        return Ok(());
    };

    let library_path = args.data_dir.join(user.library_file());
    let mut library = if library_path.exists() {
        let mut library = storage::load_library(&library_path)?;
        library.attach_catalog(Arc::clone(&catalog));
        library
    } else {
        LibraryModel::new(Arc::clone(&catalog))
    };

    main_menu(&mut library, &catalog, &mut input)?;

    storage::save_library(&library, &library_path)?;
    println!("Library saved. Goodbye!");
    Ok(())
}

/// Print a prompt and read one trimmed line. None means end of input.
fn prompt(input: &mut impl BufRead, text: &str) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Log-in / sign-up gate. None means the user chose to exit.
fn authenticate(users: &mut UserManager, input: &mut impl BufRead) -> Result<Option<User>> {
    loop {
        println!();
        println!("  1) Log in");
        println!("  2) Sign up");
        println!("  3) Exit");
        let Some(choice) = prompt(input, "Enter choice: ")? else {
            return Ok(None);
        };

        match choice.as_str() {
            "1" => {
                let Some(username) = prompt(input, "Username: ")? else {
                    return Ok(None);
                };
                let Some(password) = prompt(input, "Password: ")? else {
                    return Ok(None);
                };
                match users.login(&username, &password)? {
                    Some(user) => {
                        println!("Welcome back, {}!", user.username);
                        return Ok(Some(user.clone()));
                    }
                    None => println!("Login failed: incorrect username or password."),
                }
            }
            "2" => {
                let Some(username) = prompt(input, "Choose a username: ")? else {
                    return Ok(None);
                };
                let Some(password) = prompt(input, "Choose a password: ")? else {
                    return Ok(None);
                };
                if username.is_empty() || password.is_empty() {
                    println!("Username and password must not be empty.");
                    continue;
                }
                if users.sign_up(&username, &password)? {
                    let user = users
                        .login(&username, &password)?
                        .expect("freshly registered user must log in")
                        .clone();
                    println!("Account created. Welcome, {}!", user.username);
                    return Ok(Some(user));
                }
                println!("That username is already taken.");
            }
            "3" | "exit" => return Ok(None),
            _ => println!("Invalid choice. Try again."),
        }
    }
}

fn main_menu(
    library: &mut LibraryModel,
    catalog: &Catalog,
    input: &mut impl BufRead,
) -> Result<()> {
    loop {
        println!();
        println!("Main menu:");
        println!("   1) Search the store");
        println!("   2) Search your library");
        println!("   3) Add a song to your library");
        println!("   4) Add an album to your library");
        println!("   5) Remove a song from your library");
        println!("   6) Remove an album from your library");
        println!("   7) Create a playlist");
        println!("   8) Add a song to a playlist");
        println!("   9) Remove a song from a playlist");
        println!("  10) List playlists");
        println!("  11) Mark a song as favorite");
        println!("  12) Rate a song");
        println!("  13) Play a song");
        println!("  14) List your library");
        println!("  15) Shuffle your library");
        println!("  16) List artists in your library");
        println!("  17) List albums in your library");
        println!("  18) List favorite songs");
        println!("  19) Save and exit");

        let Some(choice) = prompt(input, "Enter choice: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" | "searchstore" => search_store(catalog, input)?,
            "2" | "searchlibrary" => search_library(library, input)?,
            "3" | "addsong" => {
                if let Some(song) = pick_catalog_song(catalog, input)? {
                    library.add_song_to_library(song.clone());
                    println!("Added: {song}");
                }
            }
            "4" | "addalbum" => {
                let Some(title) = prompt(input, "Album title: ")? else {
                    return Ok(());
                };
                let matches = catalog.find_albums_by_title(&title);
                match matches.first() {
                    Some(album) => {
                        library.add_album_to_library(album);
                        println!("Added album: {album}");
                    }
                    None => println!("No album titled '{title}' in the store."),
                }
            }
            "5" | "removesong" => {
                if let Some(song) = pick_library_song(library, input)? {
                    library.remove_song_from_library(&song);
                    println!("Removed: {song}");
                }
            }
            "6" | "removealbum" => {
                let Some(title) = prompt(input, "Album title: ")? else {
                    return Ok(());
                };
                let matches = library.search_albums_by_title(&title);
                match matches.first() {
                    Some(album) => {
                        println!("Removing album: {album}");
                        library.remove_album_from_library(album);
                    }
                    None => println!("No album titled '{title}' in your library."),
                }
            }
            "7" | "createplaylist" => {
                let Some(name) = prompt(input, "Playlist name: ")? else {
                    return Ok(());
                };
                if library.create_playlist(&name) {
                    println!("Created playlist '{name}'.");
                } else {
                    println!("A playlist named '{name}' already exists.");
                }
            }
            "8" | "addtoplaylist" => {
                let Some(name) = prompt(input, "Playlist name: ")? else {
                    return Ok(());
                };
                if library.find_playlist_by_name(&name).is_none() {
                    println!("No playlist named '{name}'.");
                    continue;
                }
                if let Some(song) = pick_catalog_song(catalog, input)? {
                    library.add_song_to_playlist(&name, song.clone());
                    println!("Added {song} to '{name}'.");
                }
            }
            "9" | "removefromplaylist" => {
                let Some(name) = prompt(input, "Playlist name: ")? else {
                    return Ok(());
                };
                if let Some(song) = pick_library_song(library, input)? {
                    library.remove_song_from_playlist(&name, &song);
                    println!("Removed {song} from '{name}'.");
                }
            }
            "10" | "listplaylists" => list_playlists(library, input)?,
            "11" | "favorite" => {
                if let Some(song) = pick_library_song(library, input)? {
                    library.mark_song_as_favorite(song.clone());
                    println!("Marked {song} as favorite.");
                }
            }
            "12" | "rate" => rate_song(library, input)?,
            "13" | "play" => {
                if let Some(song) = pick_library_song(library, input)? {
                    library.play_song(song.clone());
                    println!("Now playing: {song}");
                }
            }
            "14" | "listlibrary" => list_library(library, input)?,
            "15" | "shuffle" => {
                for song in library.shuffled_songs() {
                    println!("  {song}");
                }
            }
            "16" | "listartists" => {
                for artist in library.artists_in_library() {
                    println!("  {artist}");
                }
            }
            "17" | "listalbums" => {
                for album in library.albums_in_library() {
                    println!("  {album}");
                }
            }
            "18" | "listfavorites" => {
                for song in library.favorite_songs() {
                    println!("  {song}");
                }
            }
            "19" | "exit" => return Ok(()),
            _ => println!("Invalid choice. Try again."),
        }
    }
}

fn search_store(catalog: &Catalog, input: &mut impl BufRead) -> Result<()> {
    println!("  1) Songs by title");
    println!("  2) Songs by artist");
    println!("  3) Albums by title");
    println!("  4) Albums by artist");
    let Some(choice) = prompt(input, "Enter choice: ")? else {
        return Ok(());
    };
    let Some(query) = prompt(input, "Search for: ")? else {
        return Ok(());
    };

    match choice.as_str() {
        "1" => print_songs(catalog.find_songs_by_title(&query)),
        "2" => print_songs(catalog.find_songs_by_artist(&query)),
        "3" => {
            for album in catalog.find_albums_by_title(&query) {
                println!("  {album}");
                for song in album.songs() {
                    println!("    {}", song.title);
                }
            }
        }
        "4" => {
            for album in catalog.find_albums_by_artist(&query) {
                println!("  {album}");
            }
        }
        _ => println!("Invalid choice."),
    }
    Ok(())
}

fn search_library(library: &LibraryModel, input: &mut impl BufRead) -> Result<()> {
    println!("  1) Songs by title");
    println!("  2) Songs by artist");
    println!("  3) Albums by title");
    println!("  4) Albums by artist");
    let Some(choice) = prompt(input, "Enter choice: ")? else {
        return Ok(());
    };
    let Some(query) = prompt(input, "Search for: ")? else {
        return Ok(());
    };

    match choice.as_str() {
        "1" => print_songs(library.search_songs_by_title(&query)),
        "2" => print_songs(library.search_songs_by_artist(&query)),
        "3" => {
            for album in library.search_albums_by_title(&query) {
                println!("  {album}");
            }
        }
        "4" => {
            for album in library.search_albums_by_artist(&query) {
                println!("  {album}");
            }
        }
        _ => println!("Invalid choice."),
    }
    Ok(())
}

fn list_playlists(library: &LibraryModel, input: &mut impl BufRead) -> Result<()> {
    let mut playlists: Vec<_> = library.playlists().collect();
    playlists.sort_by(|a, b| a.name().cmp(b.name()));
    for playlist in &playlists {
        println!("  {playlist}");
    }

    let Some(name) = prompt(input, "Show playlist (blank to skip): ")? else {
        return Ok(());
    };
    if name.is_empty() {
        return Ok(());
    }
    match library.find_playlist_by_name(&name) {
        Some(playlist) => {
            for song in playlist.songs() {
                println!("  {song}");
            }
        }
        None => println!("No playlist named '{name}'."),
    }
    Ok(())
}

fn rate_song(library: &mut LibraryModel, input: &mut impl BufRead) -> Result<()> {
    let Some(song) = pick_library_song(library, input)? else {
        return Ok(());
    };
    let Some(raw) = prompt(input, "Rating (1-5): ")? else {
        return Ok(());
    };
    let Ok(rating) = raw.parse::<u8>() else {
        println!("'{raw}' is not a number.");
        return Ok(());
    };
    match library.rate_song(&song, rating) {
        Ok(()) => println!("Rated {song} {rating} star(s)."),
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn list_library(library: &LibraryModel, input: &mut impl BufRead) -> Result<()> {
    println!("  1) In added order");
    println!("  2) By title");
    println!("  3) By artist");
    println!("  4) By rating");
    let Some(choice) = prompt(input, "Enter choice: ")? else {
        return Ok(());
    };

    match choice.as_str() {
        "1" => print_songs(library.songs().iter().collect()),
        "2" => print_songs(library.songs_sorted_by_title()),
        "3" => print_songs(library.songs_sorted_by_artist()),
        "4" => {
            for song in library.songs_sorted_by_rating() {
                println!("  [{}] {song}", library.rating(song));
            }
        }
        _ => println!("Invalid choice."),
    }
    Ok(())
}

fn print_songs(songs: Vec<&Song>) {
    if songs.is_empty() {
        println!("  (no matches)");
    }
    for song in songs {
        println!("  {song}");
    }
}

/// Look a song up in the catalog by title, letting the user pick among
/// multiple matches.
fn pick_catalog_song(catalog: &Catalog, input: &mut impl BufRead) -> Result<Option<Song>> {
    let Some(title) = prompt(input, "Song title: ")? else {
        return Ok(None);
    };
    let matches: Vec<Song> = catalog
        .find_songs_by_title(&title)
        .into_iter()
        .cloned()
        .collect();
    pick_song(matches, &title, input)
}

/// Look a song up in the library by title, letting the user pick among
/// multiple matches.
fn pick_library_song(library: &LibraryModel, input: &mut impl BufRead) -> Result<Option<Song>> {
    let Some(title) = prompt(input, "Song title: ")? else {
        return Ok(None);
    };
    let matches: Vec<Song> = library
        .search_songs_by_title(&title)
        .into_iter()
        .cloned()
        .collect();
    pick_song(matches, &title, input)
}

fn pick_song(matches: Vec<Song>, title: &str, input: &mut impl BufRead) -> Result<Option<Song>> {
    match matches.len() {
        0 => {
            println!("No song titled '{title}' found.");
            Ok(None)
        }
        1 => Ok(matches.into_iter().next()),
        _ => {
            println!("Multiple matches:");
            for (i, song) in matches.iter().enumerate() {
                println!("  {}) {song}", i + 1);
            }
            let Some(raw) = prompt(input, "Pick one: ")? else {
                return Ok(None);
            };
            let index = raw.parse::<usize>().unwrap_or(0);
            if index == 0 || index > matches.len() {
                println!("Invalid selection.");
                return Ok(None);
            }
            Ok(matches.into_iter().nth(index - 1))
        }
    }
}
