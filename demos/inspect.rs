fn main() {
    let args: Vec<String> = std::env::args().collect();
    let md = if args.len() > 1 {
        std::fs::read_to_string(&args[1]).expect("Failed to read file")
    } else {
        "# Groceries\n\nSpent $42.80 at the market.\n\n- [x] milk $3.20\n- [ ] bread".to_string()
    };

    // Load config from current directory
    let config = mdblocks::Config::load(std::path::Path::new("config.toml"));
    let blocks = mdblocks::parse_with_config(&md, &config);

    println!("{}", serde_json::to_string_pretty(&blocks).unwrap());
}
