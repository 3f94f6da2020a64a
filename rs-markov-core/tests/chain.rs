use std::collections::HashSet;

use rs_markov_core::model::corpus;
use rs_markov_core::{Chain, ChainError, Memory, RngSource, Token, TransitionTable};

use Token::{Symbol, Terminator};

fn zero() -> u64 {
	0
}

fn counts<T: Ord + Clone>(table: &TransitionTable<T>, memory: &Memory<T>) -> Vec<(Token<T>, u64)> {
	table
		.get(memory)
		.map(|d| d.iter().map(|(t, c)| (t.clone(), c)).collect())
		.unwrap_or_default()
}

#[test]
fn repeated_training_equals_weighted_training() {
	let sequences: Vec<Vec<u32>> = vec![vec![], vec![7], vec![1, 2, 3, 1, 2], vec![4, 4, 4, 4]];

	for order in 1..=3 {
		for sequence in &sequences {
			let mut twice: Chain<u32> = Chain::new(order, zero).unwrap();
			twice.train(sequence).train(sequence);

			let mut weighted: Chain<u32> = Chain::new(order, zero).unwrap();
			weighted.train_weighted(sequence, 2);

			assert_eq!(twice.table(), weighted.table(), "order {} sequence {:?}", order, sequence);
		}
	}
}

#[test]
fn training_order_does_not_matter() {
	let mut forward: Chain<char> = Chain::new(2, zero).unwrap();
	forward.train_str("abc").train_str_weighted("abd", 3).train_str("b");

	let mut backward: Chain<char> = Chain::new(2, zero).unwrap();
	backward.train_str("b").train_str_weighted("abd", 3).train_str("abc");

	assert_eq!(forward.table(), backward.table());
}

#[test]
fn permuted_windows_are_distinct() {
	let mut chain: Chain<char> = Chain::new(2, zero).unwrap();
	chain.train_str("abx").train_str("bay");

	let table = chain.table();
	let ab = Memory::from([Symbol('a'), Symbol('b')]);
	let ba = Memory::from([Symbol('b'), Symbol('a')]);
	assert_eq!(counts(table, &ab), vec![(Symbol('x'), 1)]);
	assert_eq!(counts(table, &ba), vec![(Symbol('y'), 1)]);
}

#[test]
fn final_window_always_has_terminator() {
	let mut table: TransitionTable<u8> = TransitionTable::new(3).unwrap();
	let sequences: Vec<Vec<u8>> = vec![vec![1], vec![1, 2], vec![1, 2, 3, 4, 5], vec![]];

	for sequence in &sequences {
		table.train(sequence, 1);

		let last = sequence.iter().fold(table.start(), |m, s| m.push(*s));
		assert!(table.get(&last).unwrap().count(&Terminator) > 0);
	}
}

#[test]
fn untrained_chain_is_impossible_state() {
	let mut chain: Chain<char> = Chain::new(1, zero).unwrap();
	let err = chain.generate().unwrap_err();

	assert!(err.is_impossible_state());
	match err {
		ChainError::ImpossibleState { window, emitted } => {
			assert_eq!(window, "[∅]");
			assert_eq!(emitted, 0);
		}
		other => panic!("unexpected error: {}", other),
	}
}

#[test]
fn single_path_is_reproduced() {
	let mut chain = Chain::new(1, zero).unwrap();
	chain.train(&['x', 'y', 'z']);
	assert_eq!(chain.generate().unwrap(), vec!['x', 'y', 'z']);
}

#[test]
fn order_two_scenario() {
	let mut chain: Chain<i32> = Chain::new(2, zero).unwrap();
	chain.train(&[1, 2, 3]);

	let table = chain.table();
	assert_eq!(table.len(), 4);
	assert_eq!(counts(table, &Memory::from([Terminator, Terminator])), vec![(Symbol(1), 1)]);
	assert_eq!(counts(table, &Memory::from([Terminator, Symbol(1)])), vec![(Symbol(2), 1)]);
	assert_eq!(counts(table, &Memory::from([Symbol(1), Symbol(2)])), vec![(Symbol(3), 1)]);
	assert_eq!(counts(table, &Memory::from([Symbol(2), Symbol(3)])), vec![(Terminator, 1)]);

	assert_eq!(chain.generate().unwrap(), vec![1, 2, 3]);
}

#[test]
fn bigram_branching() {
	let mut chain: Chain<char> = Chain::new(1, zero).unwrap();
	chain.train_str("abab");

	let table = chain.table();
	assert_eq!(table.len(), 3);
	assert_eq!(counts(table, &Memory::from([Terminator])), vec![(Symbol('a'), 1)]);
	assert_eq!(counts(table, &Memory::from([Symbol('a')])), vec![(Symbol('b'), 2)]);
	assert_eq!(
		counts(table, &Memory::from([Symbol('b')])),
		vec![(Terminator, 1), (Symbol('a'), 1)]
	);
}

#[test]
fn bigram_outputs_follow_the_offsets() {
	// [b] -> {∅:1, a:1}: even offsets end, odd offsets loop back to 'a'
	let mut draws = vec![0u64, 0, 1, 0, 0].into_iter();
	let mut chain: Chain<char> = Chain::new(1, move || draws.next().unwrap_or(0)).unwrap();
	chain.train_str("abab");

	assert_eq!(chain.generate_string().unwrap(), "abab");
	assert_eq!(chain.generate_string().unwrap(), "ab");
}

#[test]
fn generation_does_not_touch_the_table() {
	let mut chain: Chain<char> = Chain::new(2, RngSource::seeded(7)).unwrap();
	chain.extend(["markov", "mark", "market", "marble"]);
	let before = chain.table().clone();

	for _ in 0..50 {
		chain.generate().unwrap();
	}
	assert_eq!(chain.table(), &before);
}

#[test]
fn seeded_generation_is_reproducible() {
	let names = ["lyon", "lille", "laval", "lens", "lorient", "limoges"];

	let mut a: Chain<char> = Chain::new(2, RngSource::seeded(1234)).unwrap();
	let mut b: Chain<char> = Chain::new(2, RngSource::seeded(1234)).unwrap();
	a.extend(names);
	b.extend(names);

	let xs: Vec<String> = (0..20).map(|_| a.generate_string().unwrap()).collect();
	let ys: Vec<String> = (0..20).map(|_| b.generate_string().unwrap()).collect();
	assert_eq!(xs, ys);
}

#[test]
fn generated_symbols_come_from_training() {
	let names = ["lyon", "lille", "laval", "lens", "lorient", "limoges"];
	let alphabet: HashSet<char> = names.iter().flat_map(|n| n.chars()).collect();

	let mut chain: Chain<char> = Chain::new(1, RngSource::seeded(99)).unwrap();
	chain.extend(names);

	for _ in 0..100 {
		let word = chain.generate_string().unwrap();
		assert!(word.starts_with('l'));
		assert!(word.chars().all(|c| alphabet.contains(&c)));
	}
}

#[test]
fn with_data_trains_every_sequence() {
	let data = vec![vec![1u16, 2], vec![1, 3]];
	let chain = Chain::with_data(1, zero, data).unwrap();
	assert_eq!(
		counts(chain.table(), &Memory::from([Symbol(1)])),
		vec![(Symbol(2), 1), (Symbol(3), 1)]
	);
}

#[test]
fn corpus_table_merges_into_chain() {
	let lines: Vec<String> = ["paris", "pau", "poitiers"].iter().map(|s| s.to_string()).collect();
	let table = corpus::train_lines(2, &lines).unwrap();

	let mut chain: Chain<char> = Chain::new(2, zero).unwrap();
	chain.merge_table(&table).unwrap();
	assert_eq!(chain.table(), &table);

	let mut wrong: Chain<char> = Chain::new(3, zero).unwrap();
	assert!(matches!(
		wrong.merge_table(&table),
		Err(ChainError::OrderMismatch { expected: 3, got: 2 })
	));
}

#[test]
fn corpus_file_round() {
	let dir = std::env::temp_dir().join(format!("rs-markov-corpus-{}", std::process::id()));
	std::fs::create_dir_all(&dir).unwrap();
	std::fs::write(dir.join("towns.dat"), "nice\nnimes\nnancy\n").unwrap();

	assert_eq!(corpus::list_corpora(&dir).unwrap(), vec!["towns"]);

	let table = corpus::train_file(1, dir.join("towns.dat")).unwrap();
	assert_eq!(counts(&table, &Memory::from([Terminator])), vec![(Symbol('n'), 3)]);

	std::fs::remove_dir_all(&dir).unwrap();
}
