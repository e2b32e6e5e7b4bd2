use tracing::debug;

use crate::{
    capability::{Inspectable, check_format},
    command::LedgerCommand,
    ledger::{Ledger, LedgerConfig, LedgerError},
    sink::TransactionSink,
};

use super::{CommandOutcome, CommandProcessor, ProcessError};

pub struct LedgerProcessor<S> {
    pub ledger: Ledger,
    pub sink: S,
}

impl<S: TransactionSink> LedgerProcessor<S> {
    pub fn new(config: LedgerConfig, sink: S) -> Self {
        Self {
            ledger: Ledger::new(config),
            sink,
        }
    }
}

impl<S: TransactionSink> CommandProcessor for LedgerProcessor<S> {
    fn process_command(&mut self, command: LedgerCommand) -> Result<CommandOutcome, ProcessError> {
        debug!(?command, "processing command");
        let outcome = match command {
            LedgerCommand::Create {
                kind,
                opening_balance,
            } => {
                let account = self.ledger.create_account(kind, opening_balance)?;
                CommandOutcome::Created {
                    account: account.id(),
                    summary: account.format(),
                }
            }
            LedgerCommand::Inspect { account } => {
                CommandOutcome::Inspected(self.ledger.find_account(account)?.format())
            }
            LedgerCommand::Deposit { account, amount } => {
                let acc = self.ledger.find_account_mut(account)?;
                acc.deposit(amount).map_err(LedgerError::from)?;
                CommandOutcome::BalanceChanged {
                    account,
                    balance: acc.balance(),
                }
            }
            LedgerCommand::Withdraw { account, amount } => {
                let acc = self.ledger.find_account_mut(account)?;
                acc.withdraw(amount).map_err(LedgerError::from)?;
                CommandOutcome::BalanceChanged {
                    account,
                    balance: acc.balance(),
                }
            }
            LedgerCommand::Transfer { from, to, amount } => {
                self.ledger.transfer(from, to, amount)?;
                CommandOutcome::Transferred { from, to, amount }
            }
            LedgerCommand::CheckFormat { account } => {
                let acc = self.ledger.find_account(account)?;
                CommandOutcome::FormatChecked(check_format(Inspectable::Account(acc)))
            }
            LedgerCommand::Exit => {
                self.shutdown()?;
                CommandOutcome::Exited
            }
        };
        Ok(outcome)
    }

    fn shutdown(&mut self) -> Result<(), ProcessError> {
        self.ledger.dispose_all(&mut self.sink)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{
        account::{AccountError, AccountKind},
        capability::FormatCheck,
        command::{CommandError, MenuAction, RawCommand},
        sink::in_memory_sink::InMemorySink,
    };

    use super::*;

    fn processor() -> LedgerProcessor<InMemorySink> {
        LedgerProcessor::new(
            LedgerConfig {
                capacity: 2,
                first_account_id: 100,
            },
            InMemorySink::default(),
        )
    }

    #[test]
    fn process_some_commands() {
        let mut processor = processor();
        let outcome = processor
            .process_command(LedgerCommand::Create {
                kind: AccountKind::Checking,
                opening_balance: dec!(100),
            })
            .unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::Created {
                account: 100,
                summary: "Account: 100, type: Checking, balance: 100".to_string()
            }
        );
        processor
            .process_command(LedgerCommand::Create {
                kind: AccountKind::Savings,
                opening_balance: Decimal::ZERO,
            })
            .unwrap();

        let outcome = processor
            .process_command(LedgerCommand::Deposit {
                account: 101,
                amount: dec!(5),
            })
            .unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::BalanceChanged {
                account: 101,
                balance: dec!(5)
            }
        );

        let outcome = processor
            .process_command(LedgerCommand::Transfer {
                from: 100,
                to: 101,
                amount: dec!(40),
            })
            .unwrap();
        assert_eq!(outcome.to_string(), "Transferred 40 from 100 to 101");

        let outcome = processor
            .process_command(LedgerCommand::CheckFormat { account: 101 })
            .unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::FormatChecked(FormatCheck::Supported(
                "Account: 101, type: Savings, balance: 45".to_string()
            ))
        );

        let err = processor
            .process_command(LedgerCommand::Withdraw {
                account: 100,
                amount: dec!(61),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::LedgerErr(LedgerError::AccountErr(
                AccountError::InsufficientFunds { .. }
            ))
        ));

        let err = processor
            .process_command(LedgerCommand::Create {
                kind: AccountKind::Credit,
                opening_balance: Decimal::ZERO,
            })
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Ledger is full, cannot hold more than 2 accounts"
        );

        let err = processor
            .process_command(LedgerCommand::Inspect { account: 7 })
            .unwrap_err();
        assert_eq!(err.to_string(), "Account 7 not found");
    }

    #[test]
    fn exit_flushes_logs() {
        let mut processor = processor();
        processor
            .process_command(LedgerCommand::Create {
                kind: AccountKind::Checking,
                opening_balance: dec!(10),
            })
            .unwrap();
        processor
            .process_command(LedgerCommand::Withdraw {
                account: 100,
                amount: dec!(4),
            })
            .unwrap();

        let outcome = processor.process_command(LedgerCommand::Exit).unwrap();
        assert_eq!(outcome, CommandOutcome::Exited);
        let log = processor.sink.log(100).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].amount(), dec!(-4));

        // closed accounts stay inspectable but reject changes
        processor.shutdown().unwrap();
        assert_eq!(processor.sink.writes, 1);
        let err = processor
            .process_command(LedgerCommand::Deposit {
                account: 100,
                amount: dec!(1),
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Account 100 is closed, no further operations are allowed");
        assert!(processor
            .process_command(LedgerCommand::Inspect { account: 100 })
            .is_ok());
    }

    #[test]
    fn command_errors_convert() {
        let err: ProcessError =
            LedgerCommand::parse_command(MenuAction::Inspect, RawCommand::default())
                .unwrap_err()
                .into();
        assert!(matches!(
            err,
            ProcessError::CommandErr(CommandError::AccountRequired {
                action: MenuAction::Inspect
            })
        ));
    }
}
