use utterance_engine::cli;

fn main() {
    cli::run();
}
