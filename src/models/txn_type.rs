use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

macro_rules! txn_types {
    ($($variant:ident => $tag:literal),+ $(,)?) => {
        /// Tag carried in the `txn_type` field of every flat record.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TxnType {
            $($variant),+
        }

        impl TxnType {
            pub const ALL: &'static [TxnType] = &[$(TxnType::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(TxnType::$variant => $tag),+
                }
            }
        }
    };
}

txn_types! {
    ConsensusSubmitMessage => "CONSENSUSSUBMITMESSAGE",
    ConsensusCreateTopic => "CONSENSUSCREATETOPIC",
    ConsensusUpdateTopic => "CONSENSUSUPDATETOPIC",
    ConsensusDeleteTopic => "CONSENSUSDELETETOPIC",
    CryptoTransfer => "CRYPTOTRANSFER",
    CryptoCreateAccount => "CRYPTOCREATEACCOUNT",
    CryptoUpdateAccount => "CRYPTOUPDATEACCOUNT",
    CryptoDelete => "CRYPTODELETE",
    FileUpdate => "FILEUPDATE",
    FileAppend => "FILEAPPEND",
    FileDelete => "FILEDELETE",
    FileCreate => "FILECREATE",
    ScheduleSign => "SCHEDULESIGN",
    ScheduleCreate => "SCHEDULECREATE",
    ScheduleDelete => "SCHEDULEDELETE",
    TokenCreation => "TOKENCREATION",
    TokenAssociate => "TOKENASSOCIATE",
    TokenDissociate => "TOKENDISSOCIATE",
    TokenGrantKyc => "TOKENGRANTKYC",
    TokenRevokeKyc => "TOKENREVOKEKYC",
    TokenMint => "TOKENMINT",
    TokenFreeze => "TOKENFREEZE",
    TokenUnfreeze => "TOKENUNFREEZE",
    TokenPause => "TOKENPAUSE",
    TokenUnpause => "TOKENUNPAUSE",
    TokenDeletion => "TOKENDELETION",
    TokenUpdate => "TOKENUPDATE",
    TokenBurn => "TOKENBURN",
    TokenWipe => "TOKENWIPE",
    ContractCreateInstance => "CONTRACTCREATEINSTANCE",
    ContractUpdateInstance => "CONTRACTUPDATEINSTANCE",
    ContractCall => "CONTRACTCALL",
    ContractDelete => "CONTRACTDELETE",
    EthereumTransaction => "ETHEREUMTRANSACTION",
    CryptoApproveAllowance => "CRYPTOAPPROVEALLOWANCE",
    CryptoDeleteAllowance => "CRYPTODELETEALLOWANCE",
    TokenFeeScheduleUpdate => "TOKENFEESCHEDULEUPDATE",
    NodeStakeUpdate => "NODESTAKEUPDATE",
    Other => "OTHER",
    // Produced only by reclassification
    NftTransfer => "NFTTRANSFER",
    NftWipe => "NFTWIPE",
    NftBurn => "NFTBURN",
    NftMint => "NFTMINT",
    TokenTransfers => "TOKENTRANSFERS",
    NftCreation => "NFTCREATION",
}

impl Display for TxnType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for TxnType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter()
            .copied()
            .find(|txn_type| txn_type.as_str() == value)
            .ok_or_else(|| format!("Unknown transaction type [{value}]"))
    }
}
