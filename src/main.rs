fn main() {
    dungeon_crawler::game::run();
}
