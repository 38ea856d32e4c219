use std::fs;
use std::process;
use std::time::Instant;

use clap::{App, Arg};
use log::debug;
use separator::Separatable;

use sokoban_engine::config::CycleType;
use sokoban_engine::data::{Dir, DIRECTIONS};
use sokoban_engine::input;
use sokoban_engine::LoadRoom;

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-engine")
        .about("Replays a move sequence against a room and reports the final state hash")
        .arg(
            Arg::with_name("room")
                .required(true)
                .help("path to the room file"),
        )
        .arg(
            Arg::with_name("sequence")
                .required(true)
                .help("path to the input sequence file (.sol) to reproduce"),
        )
        .arg(
            Arg::with_name("cycle-type")
                .long("cycle-type")
                .takes_value(true)
                .possible_values(&["simple", "rerecord"])
                .default_value("simple")
                .help("emulation actions performed per input"),
        )
        .arg(
            Arg::with_name("hash-output-file")
                .long("hash-output-file")
                .takes_value(true)
                .help("path to write the final state hash to"),
        )
        .get_matches();

    let room_path = matches.value_of("room").unwrap();
    let sequence_path = matches.value_of("sequence").unwrap();
    let cycle = match matches.value_of("cycle-type").unwrap() {
        "rerecord" => CycleType::Rerecord,
        _ => CycleType::Simple,
    };

    let mut room = room_path.load_room().unwrap_or_else(|err| {
        println!("Can't load room {}: {}", room_path, err);
        process::exit(1);
    });

    let sequence_raw = fs::read_to_string(sequence_path).unwrap_or_else(|err| {
        println!("Can't read sequence file {}: {}", sequence_path, err);
        process::exit(1);
    });
    let moves: Vec<Dir> = sequence_raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            input::decode(c).unwrap_or_else(|| {
                println!("Undecodable input '{}' in {}", c, sequence_path);
                process::exit(1);
            })
        })
        .collect();
    debug!("decoded {} inputs", moves.len());

    println!("[] -----------------------------------------");
    println!("[] Room File:         {}", room_path);
    println!("[] Sequence File:     {}", sequence_path);
    println!("[] Sequence Length:   {}", (moves.len() as u64).separated_string());
    println!("[] Cycle Type:        {}", cycle);

    let mut snapshot = Vec::with_capacity(room.state_size());
    room.serialize_state(&mut snapshot).unwrap();

    println!("[] ********** Running Replay **********");

    let rerecord = cycle == CycleType::Rerecord;
    let mut deadlocks = 0u64;
    let started = Instant::now();
    for &dir in &moves {
        if rerecord {
            room.apply_move(dir);
            room.deserialize_state(&mut snapshot.as_slice()).unwrap();
        }
        if room.apply_move(dir).deadlock {
            deadlocks += 1;
        }
        if rerecord {
            snapshot.clear();
            room.serialize_state(&mut snapshot).unwrap();
        }
    }
    let elapsed = started.elapsed();
    let elapsed_secs = elapsed.as_secs() as f64 + f64::from(elapsed.subsec_nanos()) * 1e-9;

    print!("{}", room);

    let possible: Vec<String> = DIRECTIONS
        .iter()
        .filter(|&&dir| room.can_move(dir))
        .map(|dir| dir.to_string().to_uppercase())
        .collect();

    let hash = room.state_hash();
    let hash_string = format!("0x{:x}", hash);

    println!("[] Elapsed time:      {:.3}s", elapsed_secs);
    println!(
        "[] Performance:       {:.3} inputs / s",
        moves.len() as f64 / elapsed_secs
    );
    println!(
        "[] Boxes on Goal:     {} / {}",
        room.boxes_on_goal(),
        room.goal_count()
    );
    match room.goal_distance() {
        Ok(distance) => println!("[] Goal Distance:     {}", distance),
        Err(err) => {
            println!("Heuristic failed: {}", err);
            process::exit(1);
        }
    }
    println!("[] Deadlocks Flagged: {}", deadlocks.separated_string());
    println!("[] Possible Moves:    {{ {} }}", possible.join(" "));
    println!("[] Final State Hash:  {}", hash_string);

    if let Some(path) = matches.value_of("hash-output-file") {
        fs::write(path, &hash_string).unwrap_or_else(|err| {
            println!("Can't write hash file {}: {}", path, err);
            process::exit(1);
        });
    }
}
